//! Sanitizer: deterministic repair of malformed LaTeX from OCR/LLM services.
//!
//! ## What goes wrong upstream?
//!
//! LaTeX that went through one JSON encoding too many loses its backslashes
//! in characteristic ways:
//!
//! - `"\frac"` is read as a form-feed byte followed by `rac`
//! - a lone `\f` survives where the generator meant `\frac`
//! - `sqrt{..}`, `pi`, `leq` arrive without their backslash
//!
//! This module undoes those artefacts without touching anything else.
//!
//! ## Rule Order
//!
//! Control characters go first so a form feed in front of `rac{..}{..}`
//! disappears before the fraction rule looks for bare `rac`. The stray-`\f`
//! rule runs before the bare-word rules so its `\frac` output is already
//! protected by a backslash when they look at it.
//!
//! Each rule's pattern excludes its own output, which makes [`sanitize`]
//! idempotent: `sanitize(sanitize(s)) == sanitize(s)`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Command names that are given back their backslash when they appear as
/// bare words.
pub const BARE_COMMANDS: &[&str] = &[
    "int", "sum", "pi", "infty", "theta", "alpha", "beta", "gamma", "delta", "sigma", "omega",
    "lambda", "mu", "phi", "psi", "rho", "tau", "approx", "neq", "leq", "geq", "pm", "times",
    "div",
];

/// Repair malformed LaTeX into canonical form.
///
/// Never fails; fragments that cannot be repaired are dropped or left as
/// literal text. Rules (applied in order):
/// 1. Strip control characters other than tab, LF and CR
/// 2. Repair stray `\f` escapes (`\f\` → drop, `\f(` / `\f{` → `\frac`)
/// 3. `rac{A}{B}` → `\frac{A}{B}`
/// 4. `sqrt{` → `\sqrt{`
/// 5. Bare whitelisted command words → backslash-prefixed commands
/// 6. Trim surrounding whitespace
pub fn sanitize(text: &str) -> String {
    let s = strip_control_chars(text);
    let s = repair_stray_escapes(&s);
    let s = repair_bare_fraction(&s);
    let s = repair_bare_sqrt(&s);
    let s = repair_bare_commands(&s);
    s.trim().to_string()
}

/// Previous character before byte offset `at`, if any.
fn char_before(input: &str, at: usize) -> Option<char> {
    input[..at].chars().next_back()
}

// ── Rule 1: Strip control characters ─────────────────────────────────────────

fn is_stray_control(c: char) -> bool {
    (c as u32) < 32 && !matches!(c, '\t' | '\n' | '\r')
}

fn strip_control_chars(input: &str) -> String {
    input.chars().filter(|&c| !is_stray_control(c)).collect()
}

// ── Rule 2: Stray `\f` escapes ───────────────────────────────────────────────
//
// `\f` followed by a letter is the start of a real command (`\frac`,
// `\forall`) and `\\f` is a line break followed by prose; both are left
// alone. Everything else is the remnant of a broken `\frac`.

static RE_STRAY_F: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[fF]\s*").unwrap());

fn repair_stray_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for m in RE_STRAY_F.find_iter(input) {
        let name_end = m.start() + 2;
        let starts_command = input[name_end..].starts_with(|c: char| c.is_ascii_alphabetic());
        if starts_command || char_before(input, m.start()) == Some('\\') {
            continue;
        }

        out.push_str(&input[last..m.start()]);
        let tail = &input[m.end()..];
        if tail.starts_with(['(', '{']) {
            out.push_str("\\frac");
        } else if !tail.starts_with('\\') {
            // Only the escape goes; the whitespace after it belongs to the text.
            out.push_str(&input[name_end..m.end()]);
        }
        last = m.end();
    }

    out.push_str(&input[last..]);
    out
}

// ── Rule 3: `rac{A}{B}` → `\frac{A}{B}` ─────────────────────────────────────

static RE_BARE_FRAC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\?f)?rac\{([^}]+)\}\{([^}]+)\}").unwrap());

fn repair_bare_fraction(input: &str) -> String {
    RE_BARE_FRAC
        .replace_all(input, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let escaped = caps.get(1).is_some_and(|m| m.as_str().starts_with('\\'));
            // `\dfrac`, `\tfrac` and `\rac`-like commands are someone else's.
            let glued = char_before(input, start)
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '\\');
            if escaped || glued {
                caps[0].to_string()
            } else {
                format!("\\frac{{{}}}{{{}}}", &caps[2], &caps[3])
            }
        })
        .into_owned()
}

// ── Rule 4: `sqrt{` → `\sqrt{` ───────────────────────────────────────────────

static RE_BARE_SQRT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\)?sqrt\{").unwrap());

fn repair_bare_sqrt(input: &str) -> String {
    RE_BARE_SQRT
        .replace_all(input, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "\\sqrt{".to_string()
            }
        })
        .into_owned()
}

// ── Rule 5: Bare command words ───────────────────────────────────────────────

static RE_BARE_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(\\)?\b({})\b", BARE_COMMANDS.join("|"))).unwrap()
});

fn repair_bare_commands(input: &str) -> String {
    RE_BARE_COMMAND
        .replace_all(input, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                format!("\\{}", &caps[2])
            }
        })
        .into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────
