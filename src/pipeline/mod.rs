//! Pipeline stages for math-notation normalisation.
//!
//! Each submodule implements exactly one transformation. All of them are
//! pure functions of their string input: no I/O, no shared mutable state,
//! and every internal loop is bounded.
//!
//! ## Data Flow
//!
//! ```text
//!                        ┌─▶ natural ─▶ canonical LaTeX
//! raw text ─▶ sanitize ──┼─▶ blocks ──▶ inline ─▶ Document
//!                        └─▶ plain ───▶ plain text
//! ```
//!
//! 1. [`sanitize`]: repair OCR/LLM artefacts (form feeds, lost backslashes)
//! 2. [`natural`]: calculator-style keystrokes → LaTeX; its root stage runs
//!    through [`fixpoint`]
//! 3. [`blocks`]: line scanner producing headings, paragraphs, lists and
//!    display math
//! 4. [`inline`]: span tokenizer for every text run the block scanner emits
//! 5. [`plain`]: LaTeX → Unicode text for fallback display and titles

pub mod blocks;
pub mod fixpoint;
pub mod inline;
pub mod natural;
pub mod plain;
pub mod sanitize;
