//! # mathdown
//!
//! Normalise the math people and machines actually produce into canonical
//! LaTeX, a renderable document model, or plain text.
//!
//! ## Why this crate?
//!
//! Math arrives in three broken shapes: LaTeX from OCR/LLM services that lost
//! its backslashes to one JSON encoding too many, calculator-style keystrokes
//! like `sqrt(16)/2`, and markdown prose with `$..$` and `\[..\]` spliced in.
//! A typesetting widget accepts none of them as-is. This crate turns each into
//! something a renderer can consume, with deterministic, total functions:
//! every `&str` yields a best-effort result and nothing panics or loops.
//!
//! ## Pipeline Overview
//!
//! ```text
//! raw text
//!  │
//!  ├─ sanitize            repair form feeds, stray `\f`, missing backslashes
//!  ├─ natural_to_latex    sqrt(x), a/b, x^2, sin(x) … → LaTeX
//!  ├─ parse_document      headings, paragraphs, lists, display + inline math
//!  └─ latex_to_plain_text LaTeX → "√(16)", "(1) / (2)", "π r^(2)"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use mathdown::{latex_to_plain_text, natural_to_latex, parse_document, sanitize, Block};
//!
//! assert_eq!(sanitize("rac{-4}{2}"), "\\frac{-4}{2}");
//! assert_eq!(natural_to_latex("(3+2)/5"), "\\frac{3+2}{5}");
//! assert_eq!(latex_to_plain_text("\\sqrt{16}"), "√(16)");
//!
//! let doc = parse_document("### Step 1\nDivide by $2$.");
//! assert!(matches!(doc.blocks[0], Block::Heading { level: 3, .. }));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mathdown` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mathdown = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod display;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{NormalizeConfig, NormalizeConfigBuilder, OutputMode};
pub use convert::{convert, convert_file, convert_to_file, write_output};
pub use display::{derive_title, unwrap_display_math, AnswerDisplay};
pub use document::{Block, Document, Inline};
pub use error::MathdownError;
pub use output::ConversionOutput;
pub use pipeline::blocks::{parse_document, parse_document_with};
pub use pipeline::fixpoint::{fixed_point, FixedPoint};
pub use pipeline::natural::{natural_to_latex, natural_to_latex_with};
pub use pipeline::plain::latex_to_plain_text;
pub use pipeline::sanitize::sanitize;
