//! CLI binary for mathdown.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `NormalizeConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use mathdown::{
    convert, convert_file, write_output, ConversionOutput, NormalizeConfig, OutputMode,
};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Repair LaTeX copied from an OCR/LLM response
  mathdown --mode sanitize -e 'rac{-4}{2} leq pi'

  # Calculator-style input to LaTeX
  mathdown --mode natural -e 'sqrt(16)/2 + x^(n+1)'

  # Parse a markdown answer into blocks, as JSON
  mathdown --mode document --json answer.md

  # Plain text for a screen reader, from stdin
  echo '\frac{1}{2}\pi r^{2}' | mathdown --mode plain -

  # History label, 30 characters max
  mathdown --mode title --title-chars 30 problem.tex

  # Widen heading recognition to # .. ######
  mathdown --headings 1-6 notes.md -o notes.txt

MODES:
  sanitize   repair malformed LaTeX (form feeds, stray \f, lost backslashes)
  natural    sqrt(x), cbrt(x), a/b, x^2, sin(x), |x|, <=, α … → LaTeX
  document   headings, paragraphs, lists, display and inline math (default)
  plain      LaTeX → Unicode text: \sqrt{16} → √(16)
  title      plain text cut to --title-chars with a "..." suffix

ENVIRONMENT VARIABLES:
  MATHDOWN_MODE             Default for --mode
  MATHDOWN_OUTPUT           Default for --output
  MATHDOWN_JSON             Emit JSON
  MATHDOWN_PRESANITIZE      Sanitize the whole document before parsing
  MATHDOWN_MAX_ROOT_PASSES  Bound on nested sqrt(..) unwrapping
  MATHDOWN_HEADINGS         Heading levels, e.g. 3-4
  MATHDOWN_TITLE_CHARS      Title length
  RUST_LOG                  Overrides -v / -q log filtering
"#;

/// Normalise math notation: repair LaTeX, translate calculator input,
/// parse markdown with math, or degrade LaTeX to plain text.
#[derive(Parser, Debug)]
#[command(
    name = "mathdown",
    version,
    about = "Normalise math notation into LaTeX, a document model, or plain text",
    long_about = "Repair malformed LaTeX from OCR/LLM services, translate calculator-style \
input (sqrt(16)/2, x^2) into LaTeX, parse markdown prose with inline and display math into \
a block/inline document, or degrade LaTeX into dictation-friendly plain text.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file path, or `-` for stdin.
    #[arg(conflicts_with = "expr")]
    input: Option<String>,

    /// Convert this text instead of reading a file.
    #[arg(short, long)]
    expr: Option<String>,

    /// Transform to apply.
    #[arg(long, env = "MATHDOWN_MODE", value_enum, default_value = "document")]
    mode: ModeArg,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, env = "MATHDOWN_OUTPUT")]
    output: Option<PathBuf>,

    /// Output structured JSON (ConversionOutput) instead of text.
    #[arg(long, env = "MATHDOWN_JSON")]
    json: bool,

    /// Sanitize the whole document before the block scan (document mode).
    #[arg(long, env = "MATHDOWN_PRESANITIZE")]
    presanitize: bool,

    /// Bound on root-unwrapping passes (default: input length).
    #[arg(long, env = "MATHDOWN_MAX_ROOT_PASSES")]
    max_root_passes: Option<usize>,

    /// Heading levels recognised: 3-4, or a single level like 3.
    #[arg(long, env = "MATHDOWN_HEADINGS", default_value = "3-4")]
    headings: String,

    /// Character budget for title mode.
    #[arg(long, env = "MATHDOWN_TITLE_CHARS", default_value_t = 50)]
    title_chars: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MATHDOWN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MATHDOWN_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Sanitize,
    Natural,
    Document,
    Plain,
    Title,
}

impl From<ModeArg> for OutputMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Sanitize => OutputMode::Sanitize,
            ModeArg::Natural => OutputMode::Natural,
            ModeArg::Document => OutputMode::Document,
            ModeArg::Plain => OutputMode::Plain,
            ModeArg::Title => OutputMode::Title,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let mode = OutputMode::from(cli.mode);

    // ── Run conversion ───────────────────────────────────────────────────
    let output = run(&cli, mode, &config)?;
    let rendered = render(&output, cli.json)?;

    if let Some(ref output_path) = cli.output {
        write_output(output_path, &rendered)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        if !cli.quiet {
            eprintln!(
                "{}  {}  {}  →  {}",
                green("✔"),
                mode.as_str(),
                dim(&format!("{} chars", rendered.chars().count())),
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure a trailing newline on stdout.
        if !rendered.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}

/// Read the selected input and convert it.
fn run(cli: &Cli, mode: OutputMode, config: &NormalizeConfig) -> Result<ConversionOutput> {
    if let Some(ref expr) = cli.expr {
        return Ok(convert(expr, mode, config));
    }

    match cli.input.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(convert(&text, mode, config))
        }
        Some(path) => convert_file(path, mode, config).context("Conversion failed"),
    }
}

fn render(output: &ConversionOutput, json: bool) -> Result<String> {
    if json {
        output.to_json().context("Failed to serialise output")
    } else {
        Ok(output.to_text())
    }
}

/// Map CLI args to `NormalizeConfig`.
fn build_config(cli: &Cli) -> Result<NormalizeConfig> {
    let (min, max) = parse_headings(&cli.headings)?;

    let mut builder = NormalizeConfig::builder()
        .presanitize(cli.presanitize)
        .heading_levels(min, max)
        .title_max_chars(cli.title_chars);

    if let Some(n) = cli.max_root_passes {
        builder = builder.max_root_passes(n);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--headings` string into an inclusive level range.
fn parse_headings(s: &str) -> Result<(u8, u8)> {
    let s = s.trim();

    // Range: "3-4"
    if let Some((min, max)) = s.split_once('-') {
        let min: u8 = min
            .trim()
            .parse()
            .context("Invalid lowest heading level")?;
        let max: u8 = max
            .trim()
            .parse()
            .context("Invalid highest heading level")?;
        if min > max {
            anyhow::bail!("Invalid heading range '{}-{}': start must be <= end", min, max);
        }
        return Ok((min, max));
    }

    // Single level: "3"
    let level: u8 = s.parse().context("Invalid heading level")?;
    Ok((level, level))
}
