//! Presentation helpers built on the pipeline.
//!
//! These are the small glue steps a view performs before showing math:
//! strip display delimiters from a stored problem, decide whether a final
//! answer needs its LaTeX form shown next to the plain one, and derive a
//! short history label.

use crate::pipeline::plain::latex_to_plain_text;
use crate::pipeline::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove one leading `\[` and one trailing `\]`, then sanitize.
pub fn unwrap_display_math(latex: &str) -> String {
    let s = latex.trim();
    let s = s.strip_prefix("\\[").unwrap_or(s);
    let s = s.strip_suffix("\\]").unwrap_or(s);
    sanitize(s)
}

/// A final answer, normalised for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDisplay {
    /// Sanitized LaTeX with whitespace runs collapsed.
    pub latex: String,
    /// Plain-text rendering of `latex`.
    pub plain: String,
    /// True when the plain form lost information and the typeset LaTeX
    /// should be shown as well.
    pub show_latex: bool,
}

impl AnswerDisplay {
    pub fn from_raw(raw: &str) -> Self {
        let sanitized = sanitize(raw);
        let latex = RE_WHITESPACE.replace_all(&sanitized, " ").into_owned();
        let plain = latex_to_plain_text(&latex);
        let show_latex = !latex.is_empty() && plain != latex;
        Self {
            latex,
            plain,
            show_latex,
        }
    }

    /// Primary text to show: the plain form, else the LaTeX, else nothing.
    ///
    /// `None` means the caller should show its own "result unavailable"
    /// message.
    pub fn text(&self) -> Option<&str> {
        [self.plain.as_str(), self.latex.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}

/// Short human-readable label for a LaTeX problem.
///
/// The LaTeX is degraded to plain text and cut to `max_chars` characters,
/// with `...` appended when something was cut. Returns `None` when nothing
/// readable remains.
pub fn derive_title(latex: &str, max_chars: usize) -> Option<String> {
    let plain = latex_to_plain_text(latex);
    if plain.is_empty() {
        return None;
    }
    if plain.chars().count() <= max_chars {
        return Some(plain);
    }
    let cut: String = plain.chars().take(max_chars).collect();
    Some(format!("{}...", cut.trim_end()))
}
