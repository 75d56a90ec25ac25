//! Inline tokenizer: one text run → a sequence of [`Inline`] spans.
//!
//! A single combined pattern is scanned left to right. At each position the
//! alternatives are tried in priority order:
//!
//! 1. `\( .. \)` inline math
//! 2. `$$ .. $$` display math written inline
//! 3. `$ .. $` inline math
//! 4. `** .. **` bold
//! 5. `* .. *` italic
//! 6. raw macro calls, `\name[opt]{..}{..}`
//!
//! Every alternative has its own named group, and each group maps to exactly
//! one [`Inline`] variant. Text between matches becomes [`Inline::Text`].
//! An unterminated delimiter simply fails to match and stays literal text.

use crate::document::Inline;
use crate::pipeline::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\\\((?P<paren>.+?)\\\)",
        r"|\$\$(?P<display>[^$]+)\$\$",
        r"|\$(?P<dollar>[^$]+)\$",
        r"|\*\*(?P<bold>[^*]+)\*\*",
        r"|\*(?P<italic>[^*]+)\*",
        r"|(?P<macro>\\[a-zA-Z]+(?:\[[^\]]+\])?(?:\{[^{}]+\})+)",
    ))
    .unwrap()
});

/// Split `text` into inline spans.
pub fn tokenize_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in RE_INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        spans.push(span_from(&caps));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Inline::Text(text[last..].to_string()));
    }
    spans
}

fn span_from(caps: &Captures<'_>) -> Inline {
    let math = caps
        .name("paren")
        .or_else(|| caps.name("display"))
        .or_else(|| caps.name("dollar"))
        .or_else(|| caps.name("macro"));
    if let Some(m) = math {
        let latex = sanitize(m.as_str());
        // `$ $` and friends carry nothing worth typesetting.
        if latex.is_empty() {
            return Inline::Text(caps[0].to_string());
        }
        return Inline::InlineMath(latex);
    }
    if let Some(m) = caps.name("bold") {
        return Inline::Bold(tokenize_inline(m.as_str()));
    }
    if let Some(m) = caps.name("italic") {
        return Inline::Italic(m.as_str().to_string());
    }
    Inline::Text(caps[0].to_string())
}
