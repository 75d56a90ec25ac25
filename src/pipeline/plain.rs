//! Plain-text degrader: canonical LaTeX → dictation-friendly Unicode text.
//!
//! The output is meant for screen readers, search and history labels. It
//! never contains a backslash or a brace. Input is sanitized first, so the
//! degrader also accepts the malformed fragments the sanitizer repairs.

use crate::pipeline::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Degrade LaTeX to plain text.
///
/// Rules (applied in order after [`sanitize`]):
/// 1. Unwrap text wrappers (`\text{..}`, `\mathrm{..}`, ...) to their contents
/// 2. Drop `\left`/`\right` sizing, including the `.` null delimiter
/// 3. `\frac{A}{B}` → `(A) / (B)`, one level per brace pair
/// 4. `\sqrt[N]{A}` → `N√(A)`, `\sqrt{A}` → `√(A)`
/// 5. `^{E}` → `^(E)`
/// 6. Spacing commands (`\,` `\;` `\!` `\\`) → a space or nothing
/// 7. Known commands → Unicode symbols; unknown ones keep their name
/// 8. Strip leftover braces and backslashes, collapse whitespace, trim
pub fn latex_to_plain_text(latex: &str) -> String {
    let s = sanitize(latex);
    if s.is_empty() {
        return s;
    }
    let s = unwrap_text_wrappers(&s);
    let s = drop_delimiter_sizing(&s);
    let s = linearize_fractions(&s);
    let s = linearize_roots(&s);
    let s = linearize_exponents(&s);
    let s = replace_spacing(&s);
    let s = replace_symbols(&s);
    let out = strip_markup(&s);
    debug!(input_len = latex.len(), output_len = out.len(), "degraded latex to plain text");
    out
}

// ── Rule 1: Text wrappers ────────────────────────────────────────────────────

static RE_TEXT_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\(?:text|textbf|textit|textrm|mbox|mathrm|mathbf|mathit|mathsf|mathbb|mathcal|operatorname)\s*\{([^{}]*)\}",
    )
    .unwrap()
});

fn unwrap_text_wrappers(input: &str) -> String {
    RE_TEXT_WRAPPER.replace_all(input, "$1").into_owned()
}

// ── Rule 2: `\left` / `\right` ───────────────────────────────────────────────

static RE_SIZING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:left|right)\b\.?").unwrap());

fn drop_delimiter_sizing(input: &str) -> String {
    RE_SIZING.replace_all(input, "").into_owned()
}

// ── Rule 3: Fractions ────────────────────────────────────────────────────────

static RE_FRAC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\frac\s*\{([^{}]+)\}\s*\{([^{}]+)\}").unwrap());

fn linearize_fractions(input: &str) -> String {
    RE_FRAC.replace_all(input, "($1) / ($2)").into_owned()
}

// ── Rule 4: Roots ────────────────────────────────────────────────────────────

static RE_NTH_ROOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\sqrt\s*\[([^\]]+)\]\s*\{([^{}]+)\}").unwrap());
static RE_SQRT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\sqrt\s*\{([^{}]+)\}").unwrap());

fn linearize_roots(input: &str) -> String {
    let s = RE_NTH_ROOT.replace_all(input, "$1√($2)");
    RE_SQRT.replace_all(&s, "√($1)").into_owned()
}

// ── Rule 5: Braced exponents ─────────────────────────────────────────────────

static RE_EXPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^\{([^{}]+)\}").unwrap());

fn linearize_exponents(input: &str) -> String {
    RE_EXPONENT.replace_all(input, "^($1)").into_owned()
}

// ── Rule 6: Spacing commands ─────────────────────────────────────────────────

static RE_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(\\|[,;:! ])").unwrap());

fn replace_spacing(input: &str) -> String {
    RE_SPACING
        .replace_all(input, |caps: &Captures<'_>| match &caps[1] {
            "!" => "",
            _ => " ",
        })
        .into_owned()
}

// ── Rule 7: Symbols ──────────────────────────────────────────────────────────

static RE_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([A-Za-z]+)").unwrap());

/// Unicode rendering of a command, if it has one.
fn symbol(name: &str) -> Option<&'static str> {
    let glyph = match name {
        "times" => "×",
        "cdot" => "·",
        "div" => "÷",
        "pm" => "±",
        "mp" => "∓",
        "infty" => "∞",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "to" | "rightarrow" => "→",
        "int" => "∫",
        "sum" => "∑",
        "prod" => "∏",
        "partial" => "∂",
        "in" => "∈",
        "cdots" => "⋯",
        "ldots" | "dots" => "…",
        "degree" | "circ" => "°",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" | "varepsilon" => "ε",
        "theta" => "θ",
        "lambda" => "λ",
        "mu" => "μ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "tau" => "τ",
        "phi" | "varphi" => "φ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Phi" => "Φ",
        "Omega" => "Ω",
        _ => return None,
    };
    Some(glyph)
}

fn replace_symbols(input: &str) -> String {
    RE_COMMAND
        .replace_all(input, |caps: &Captures<'_>| {
            symbol(&caps[1]).map_or_else(|| caps[1].to_string(), str::to_string)
        })
        .into_owned()
}

// ── Rule 8: Leftover markup and whitespace ───────────────────────────────────

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn strip_markup(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\'))
        .collect();
    RE_WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
