//! Configuration types for normalisation and parsing.
//!
//! Every transform works with no configuration at all; the free functions in
//! [`crate::pipeline`] use [`NormalizeConfig::default()`]. The config exists
//! for the few knobs a caller may legitimately want to turn: the root-loop
//! bound, heading recognition, and title length.

use crate::error::MathdownError;
use serde::{Deserialize, Serialize};

/// Configuration for the normalisation pipeline.
///
/// Built via [`NormalizeConfig::builder()`] or using
/// [`NormalizeConfig::default()`].
///
/// # Example
/// ```rust
/// use mathdown::NormalizeConfig;
///
/// let config = NormalizeConfig::builder()
///     .heading_levels(1, 4)
///     .title_max_chars(40)
///     .build()
///     .unwrap();
/// assert_eq!(config.min_heading_level, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Upper bound on root-unwrapping passes in the natural translator.
    /// Default: `None`, meaning "byte length of the input" (at least 1).
    ///
    /// Each productive pass removes one `sqrt(..)` call, so the input length
    /// is always enough to reach the fixed point. The bound exists so a
    /// crafted input can never keep the loop spinning.
    pub max_root_passes: Option<usize>,

    /// Sanitize the whole document text before the block scan. Default: false.
    ///
    /// Math payloads are always sanitized. Sanitizing prose as well turns
    /// ordinary words such as "times" or "pi" into commands, so it is off
    /// unless the input is known to be LaTeX-heavy.
    pub presanitize: bool,

    /// Lowest `#` count recognised as a heading. Default: 3 (`###`).
    pub min_heading_level: u8,

    /// Highest `#` count recognised as a heading. Default: 4 (`####`).
    pub max_heading_level: u8,

    /// Character budget for [`crate::display::derive_title`]. Default: 50.
    pub title_max_chars: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            max_root_passes: None,
            presanitize: false,
            min_heading_level: 3,
            max_heading_level: 4,
            title_max_chars: 50,
        }
    }
}

impl NormalizeConfig {
    /// Create a new builder for `NormalizeConfig`.
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Root-pass bound for an input of `input_len` bytes.
    pub fn root_pass_limit(&self, input_len: usize) -> usize {
        self.max_root_passes.unwrap_or_else(|| input_len.max(1))
    }

    /// Whether a run of `level` leading `#` marks a heading.
    pub fn is_heading_level(&self, level: usize) -> bool {
        (self.min_heading_level as usize..=self.max_heading_level as usize).contains(&level)
    }
}

/// Builder for [`NormalizeConfig`].
#[derive(Debug)]
pub struct NormalizeConfigBuilder {
    config: NormalizeConfig,
}

impl NormalizeConfigBuilder {
    pub fn max_root_passes(mut self, n: usize) -> Self {
        self.config.max_root_passes = Some(n);
        self
    }

    pub fn presanitize(mut self, v: bool) -> Self {
        self.config.presanitize = v;
        self
    }

    pub fn heading_levels(mut self, min: u8, max: u8) -> Self {
        self.config.min_heading_level = min;
        self.config.max_heading_level = max;
        self
    }

    pub fn title_max_chars(mut self, n: usize) -> Self {
        self.config.title_max_chars = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<NormalizeConfig, MathdownError> {
        let c = &self.config;
        if !(1..=6).contains(&c.min_heading_level) || !(1..=6).contains(&c.max_heading_level) {
            return Err(MathdownError::InvalidConfig(format!(
                "heading levels must be 1–6, got {}–{}",
                c.min_heading_level, c.max_heading_level
            )));
        }
        if c.min_heading_level > c.max_heading_level {
            return Err(MathdownError::InvalidConfig(format!(
                "min heading level {} exceeds max {}",
                c.min_heading_level, c.max_heading_level
            )));
        }
        if c.title_max_chars == 0 {
            return Err(MathdownError::InvalidConfig(
                "title length must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which transform [`crate::convert::convert`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Repair malformed LaTeX.
    Sanitize,
    /// Calculator-style input → LaTeX.
    Natural,
    /// Markdown + math prose → block/inline document. (default)
    #[default]
    Document,
    /// LaTeX → dictation-friendly plain text.
    Plain,
    /// LaTeX → short history label.
    Title,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Sanitize => "sanitize",
            OutputMode::Natural => "natural",
            OutputMode::Document => "document",
            OutputMode::Plain => "plain",
            OutputMode::Title => "title",
        }
    }
}
