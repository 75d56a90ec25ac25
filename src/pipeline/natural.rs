//! Natural translator: calculator-style input → canonical LaTeX.
//!
//! Users of a manual problem editor type `sqrt(16)`, `(3+2)/5` or `x^2`
//! rather than LaTeX. This module rewrites that shorthand through a fixed
//! sequence of small stages, each a pure `&str → String` function.
//!
//! ## Stage Order
//!
//! Stages run from the least to the most ambiguous construct. Function calls
//! and roots go first because rewriting them removes bare parentheses that
//! the generic fraction and exponent patterns would otherwise latch onto.
//! Fractions come before exponents so `^(..)` groups feeding a `/` are read
//! as operands. The sanitizer runs last over the assembled result, which
//! makes the output a fixed point of [`crate::sanitize`].
//!
//! The fraction heuristics are deliberately narrow: they recognise common
//! flat shapes and do not attempt a full expression grammar.

use crate::config::NormalizeConfig;
use crate::pipeline::fixpoint::fixed_point;
use crate::pipeline::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use tracing::debug;

/// Translate natural notation into canonical LaTeX with default settings.
pub fn natural_to_latex(text: &str) -> String {
    natural_to_latex_with(text, &NormalizeConfig::default())
}

/// Translate natural notation into canonical LaTeX.
///
/// Stages (applied in order):
/// 1. Unicode glyphs → commands (`α` → `\alpha`, `√` → `\sqrt`)
/// 2. `<=`, `>=`, `!=` → `\leq`, `\geq`, `\neq`
/// 3. `log_(b)(x)` → `\log_{b}\left(x\right)`
/// 4. `sin(x)` and friends → `\sin\left(x\right)`
/// 5. `sqrt(x)` / `cbrt(x)` → `\sqrt{x}` / `\sqrt[3]{x}`, to a bounded fixed point
/// 6. Fractions: grouped operands first, then bare `a/b`
/// 7. `dy/dx` style derivatives → `\frac{dy}{dx}`
/// 8. `|x|` → `\left|x\right|`
/// 9. `^2`, `^(x+1)` → `^{2}`, `^{x+1}`
/// 10. `*` → `\cdot`
/// 11. [`sanitize`]
pub fn natural_to_latex_with(text: &str, config: &NormalizeConfig) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = substitute_glyphs(text);
    let s = expand_inequalities(&s);
    let s = rewrite_log_base(&s);
    let s = rewrite_functions(&s);
    let s = unwrap_roots(&s, config.root_pass_limit(text.len()));
    let s = rewrite_fractions(&s);
    let s = rewrite_derivatives(&s);
    let s = rewrite_absolute_values(&s);
    let s = brace_exponents(&s);
    let s = rewrite_products(&s);
    let latex = sanitize(&s);

    debug!(input_len = text.len(), output_len = latex.len(), "translated natural notation");
    latex
}

// ── Stage 1: Unicode glyphs ──────────────────────────────────────────────────
//
// Plain substring replacement: a regex would gain nothing and could match
// across glyph boundaries.

const GLYPHS: &[(char, &str)] = &[
    ('α', "\\alpha"),
    ('β', "\\beta"),
    ('γ', "\\gamma"),
    ('δ', "\\delta"),
    ('Δ', "\\Delta"),
    ('θ', "\\theta"),
    ('λ', "\\lambda"),
    ('μ', "\\mu"),
    ('σ', "\\sigma"),
    ('ω', "\\omega"),
    ('Ω', "\\Omega"),
    ('π', "\\pi"),
    ('∞', "\\infty"),
    ('±', "\\pm"),
    ('÷', "\\div"),
    ('×', "\\times"),
    ('∫', "\\int"),
    ('Σ', "\\sum"),
    ('√', "\\sqrt"),
    ('∛', "\\sqrt[3]"),
    ('∂', "\\partial"),
    ('→', "\\to"),
    ('∈', "\\in"),
    ('≤', "\\leq"),
    ('≥', "\\geq"),
    ('≠', "\\neq"),
    ('≈', "\\approx"),
];

fn glyph_command(c: char) -> Option<&'static str> {
    GLYPHS.iter().find(|(g, _)| *g == c).map(|(_, cmd)| *cmd)
}

/// Pre: arbitrary text. Post: no glyph from [`GLYPHS`] remains.
fn substitute_glyphs(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match glyph_command(c) {
            Some(cmd) => {
                out.push_str(cmd);
                // `\pi` + `r` must not fuse into `\pir`.
                if chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                    out.push(' ');
                }
            }
            None => out.push(c),
        }
    }
    out
}

// ── Stage 2: Inequality shorthand ────────────────────────────────────────────

/// Pre: no glyphs. Post: no `<=`, `>=`, `!=` digraphs.
fn expand_inequalities(input: &str) -> String {
    input
        .replace("<=", "\\leq ")
        .replace(">=", "\\geq ")
        .replace("!=", "\\neq ")
}

// ── Stage 3: Logarithm with base ─────────────────────────────────────────────

static RE_LOG_BASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\\?log_\(([^)]+)\)\s*\(([^)]+)\)").unwrap());

/// Pre: none. Post: `log_(b)(x)` calls are `\log_{b}\left(x\right)`.
fn rewrite_log_base(input: &str) -> String {
    RE_LOG_BASE
        .replace_all(input, "\\log_{${1}}\\left(${2}\\right)")
        .into_owned()
}

// ── Stage 4: Named functions ─────────────────────────────────────────────────

static RE_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\\)?(sin|cos|tan|ln|log|exp)\s*\(([^()]*)\)").unwrap()
});

/// Pre: log-with-base already rewritten. Post: flat calls of the six named
/// functions are `\fn\left(..\right)`.
fn rewrite_functions(input: &str) -> String {
    RE_FUNCTION
        .replace_all(input, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let glued = caps.get(1).is_none()
                && input[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_alphabetic());
            if glued {
                // `arcsin(x)`, `cosh`-like names: leave the call alone.
                return caps[0].to_string();
            }
            format!(
                "\\{}\\left({}\\right)",
                caps[2].to_ascii_lowercase(),
                &caps[3]
            )
        })
        .into_owned()
}

// ── Stage 5: Roots (bounded fixed point) ─────────────────────────────────────

static RE_ROOT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\\?(sqrt|cbrt)(\[[^\]]*\])?\s*\(([^()]+)\)").unwrap()
});

fn unwrap_roots_once(input: &str) -> Cow<'_, str> {
    RE_ROOT_CALL.replace_all(input, |caps: &Captures<'_>| {
        let index = match caps.get(2) {
            Some(m) => m.as_str(),
            None if caps[1].eq_ignore_ascii_case("cbrt") => "[3]",
            None => "",
        };
        format!("\\sqrt{}{{{}}}", index, &caps[3])
    })
}

/// Pre: function calls rewritten. Post: no flat `sqrt(..)` call remains,
/// unless the pass bound was reached first.
fn unwrap_roots(input: &str, max_passes: usize) -> String {
    let result = fixed_point(input, max_passes, unwrap_roots_once);
    if result.passes > 1 {
        debug!(passes = result.passes, "unwrapped nested roots");
    }
    result.value
}

// ── Stage 6: Fractions ───────────────────────────────────────────────────────
//
// A grouped operand is `(..)`, a rewritten call `\fn\left(..\right)`, or a
// braced root `\sqrt{..}`. The first pass handles every fraction with at
// least one grouped side; the second handles `a/b` between bare tokens.

const ATOM: &str = r"\\[A-Za-z]+\\left\([^()]*\\right\)|\\sqrt(?:\[[^\]]*\])?\{[^{}]*\}";

static RE_GROUPED_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:(?P<na>{ATOM})|\((?P<np>[^()]+)\)|(?P<nb>\\?[A-Za-z0-9.]+))\s*/\s*(?:(?P<da>{ATOM})|\((?P<dp>[^()]+)\)|(?P<db>\\?[A-Za-z0-9.]+))"
    ))
    .unwrap()
});

static RE_BARE_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<num>\\?[A-Za-z0-9.+\-]+)\s*/\s*(?P<den>\\?[A-Za-z0-9.+\-]+)").unwrap()
});

fn operand<'t>(caps: &Captures<'t>, names: [&str; 3]) -> &'t str {
    names
        .iter()
        .find_map(|n| caps.name(n))
        .map_or("", |m| m.as_str())
}

/// Pre: roots and calls rewritten. Post: recognised `a/b` shapes are `\frac`.
fn rewrite_fractions(input: &str) -> String {
    let grouped = RE_GROUPED_FRACTION.replace_all(input, |caps: &Captures<'_>| {
        if caps.name("nb").is_some() && caps.name("db").is_some() {
            return caps[0].to_string();
        }
        // `2^(x+1)/3`: the group is an exponent, not a numerator.
        let start = caps.get(0).map_or(0, |m| m.start());
        if caps.name("np").is_some() && input[..start].trim_end().ends_with('^') {
            return caps[0].to_string();
        }
        let num = operand(caps, ["na", "np", "nb"]);
        let den = operand(caps, ["da", "dp", "db"]);
        format!("\\frac{{{num}}}{{{den}}}")
    });

    RE_BARE_FRACTION
        .replace_all(&grouped, |caps: &Captures<'_>| {
            if caps[0].contains("\\frac") {
                return caps[0].to_string();
            }
            format!("\\frac{{{}}}{{{}}}", &caps["num"], &caps["den"])
        })
        .into_owned()
}

// ── Stage 7: Derivatives ─────────────────────────────────────────────────────

static RE_DERIVATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"d([A-Za-z])\s*/\s*d([A-Za-z])").unwrap());

/// Catches `dX/dY` forms the fraction stage left behind.
fn rewrite_derivatives(input: &str) -> String {
    RE_DERIVATIVE
        .replace_all(input, "\\frac{d${1}}{d${2}}")
        .replace("dy/dx", "\\frac{dy}{dx}")
}

// ── Stage 8: Absolute values ─────────────────────────────────────────────────

static RE_ABSOLUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|([^|]+)\|").unwrap());

fn rewrite_absolute_values(input: &str) -> String {
    RE_ABSOLUTE
        .replace_all(input, "\\left|${1}\\right|")
        .into_owned()
}

// ── Stage 9: Exponent bracing ────────────────────────────────────────────────

static RE_EXPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^\s*(?:\((?P<group>[^()]+)\)|(?P<token>[-+]?[A-Za-z0-9.,]+))").unwrap()
});

/// Pre: fractions settled. Post: every caret followed by a token or a flat
/// group has a braced exponent.
fn brace_exponents(input: &str) -> String {
    RE_EXPONENT
        .replace_all(input, |caps: &Captures<'_>| {
            let exp = caps
                .name("group")
                .or_else(|| caps.name("token"))
                .map_or("", |m| m.as_str().trim());
            format!("^{{{exp}}}")
        })
        .into_owned()
}

// ── Stage 10: Products ───────────────────────────────────────────────────────

static RE_PRODUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*\s*").unwrap());

fn rewrite_products(input: &str) -> String {
    RE_PRODUCT.replace_all(input, "\\cdot ").into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────
