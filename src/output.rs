//! Conversion result type.

use crate::config::OutputMode;
use crate::document::Document;
use crate::error::MathdownError;
use serde::{Deserialize, Serialize};

/// Result of [`crate::convert::convert`], one variant per [`OutputMode`].
///
/// Serialises with a `mode` tag, e.g. `{"mode":"plain","text":"√(16)"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConversionOutput {
    Sanitize { latex: String },
    Natural { latex: String },
    Document { document: Document },
    Plain { text: String },
    /// `None` when the input had nothing readable to build a label from.
    Title { title: Option<String> },
}

impl ConversionOutput {
    pub fn mode(&self) -> OutputMode {
        match self {
            ConversionOutput::Sanitize { .. } => OutputMode::Sanitize,
            ConversionOutput::Natural { .. } => OutputMode::Natural,
            ConversionOutput::Document { .. } => OutputMode::Document,
            ConversionOutput::Plain { .. } => OutputMode::Plain,
            ConversionOutput::Title { .. } => OutputMode::Title,
        }
    }

    /// Human-readable rendering. Documents are linearised with
    /// [`Document::plain_text`]; a missing title renders as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            ConversionOutput::Sanitize { latex } | ConversionOutput::Natural { latex } => {
                latex.clone()
            }
            ConversionOutput::Document { document } => document.plain_text(),
            ConversionOutput::Plain { text } => text.clone(),
            ConversionOutput::Title { title } => title.clone().unwrap_or_default(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MathdownError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
