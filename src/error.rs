//! Error types for the mathdown library.
//!
//! The four text transforms ([`crate::sanitize`], [`crate::natural_to_latex`],
//! [`crate::parse_document`], [`crate::latex_to_plain_text`]) are total: any
//! `&str` produces a best-effort result and nothing is ever returned as an
//! error. A badly broken input shows up as leftover literal text in the
//! output, not as an `Err`.
//!
//! [`MathdownError`] therefore only covers the surfaces around that core:
//! reading input files, writing output files, validating a
//! [`crate::config::NormalizeConfig`], and serialising results.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mathdown library.
#[derive(Debug, Error)]
pub enum MathdownError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but is not valid UTF-8 text.
    #[error("Input file '{path}' is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    /// Any other read failure.
    #[error("Failed to read input file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A result could not be rendered as JSON.
    #[error("Failed to serialise output: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MathdownError {
    /// Map an I/O error raised while reading `path` to the matching variant.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => MathdownError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => MathdownError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => MathdownError::InvalidUtf8 { path },
            _ => MathdownError::ReadFailed { path, source },
        }
    }
}
