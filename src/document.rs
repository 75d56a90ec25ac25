//! Structured document model produced by [`crate::parse_document`].
//!
//! The parser never renders anything. It returns this two-level model, and a
//! separate UI layer decides how a [`Block`] or [`Inline`] is displayed.
//! Blocks never nest, and their order in [`Document::blocks`] is the order
//! in which they appeared in the source.

use crate::pipeline::plain::latex_to_plain_text;
use serde::{Deserialize, Serialize};

/// An ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Paragraph-level element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, inlines: Vec<Inline> },
    Paragraph { inlines: Vec<Inline> },
    List { items: Vec<Vec<Inline>> },
    /// Display math; `latex` is already sanitized.
    MathBlock { latex: String },
}

/// Span-level element inside a block.
///
/// Adjacent `Text` spans are not coalesced; concatenating them in order
/// reproduces the source text between the other spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(String),
    /// Inline math; the LaTeX is already sanitized.
    InlineMath(String),
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Linearise the document for fallback display: one line per block,
    /// list items prefixed with `• `, math degraded to plain text.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Heading { inlines, .. } | Block::Paragraph { inlines } => {
                    lines.push(inlines_plain_text(inlines));
                }
                Block::List { items } => {
                    for item in items {
                        lines.push(format!("• {}", inlines_plain_text(item)));
                    }
                }
                Block::MathBlock { latex } => lines.push(latex_to_plain_text(latex)),
            }
        }
        lines.join("\n")
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Plain rendering of a span sequence.
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Italic(s) => out.push_str(s),
            Inline::Bold(children) => out.push_str(&inlines_plain_text(children)),
            Inline::InlineMath(latex) => out.push_str(&latex_to_plain_text(latex)),
        }
    }
    out
}
