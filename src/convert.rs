//! Conversion entry points over strings and files.
//!
//! [`convert`] dispatches one input string to the transform selected by
//! [`OutputMode`] and never fails. The file variants add the I/O around it:
//! UTF-8 reading with typed errors, and atomic writes through a temp file in
//! the destination directory so a reader never sees a half-written result.

use crate::config::{NormalizeConfig, OutputMode};
use crate::display::derive_title;
use crate::error::MathdownError;
use crate::output::ConversionOutput;
use crate::pipeline::blocks::parse_document_with;
use crate::pipeline::natural::natural_to_latex_with;
use crate::pipeline::plain::latex_to_plain_text;
use crate::pipeline::sanitize::sanitize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Apply the transform selected by `mode` to `input`.
///
/// # Example
/// ```rust
/// use mathdown::{convert, NormalizeConfig, OutputMode};
///
/// let out = convert("sqrt(16)", OutputMode::Natural, &NormalizeConfig::default());
/// assert_eq!(out.to_text(), "\\sqrt{16}");
/// ```
pub fn convert(input: &str, mode: OutputMode, config: &NormalizeConfig) -> ConversionOutput {
    debug!(mode = mode.as_str(), input_len = input.len(), "converting");
    match mode {
        OutputMode::Sanitize => ConversionOutput::Sanitize {
            latex: sanitize(input),
        },
        OutputMode::Natural => ConversionOutput::Natural {
            latex: natural_to_latex_with(input, config),
        },
        OutputMode::Document => ConversionOutput::Document {
            document: parse_document_with(input, config),
        },
        OutputMode::Plain => ConversionOutput::Plain {
            text: latex_to_plain_text(input),
        },
        OutputMode::Title => ConversionOutput::Title {
            title: derive_title(input, config.title_max_chars),
        },
    }
}

/// Read a UTF-8 file and convert its contents.
///
/// # Errors
/// - [`MathdownError::FileNotFound`] / [`MathdownError::PermissionDenied`]
/// - [`MathdownError::InvalidUtf8`] when the file is not text
/// - [`MathdownError::ReadFailed`] for any other I/O failure
pub fn convert_file(
    path: impl AsRef<Path>,
    mode: OutputMode,
    config: &NormalizeConfig,
) -> Result<ConversionOutput, MathdownError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|e| MathdownError::from_read(path, e))?;
    info!("Converting {} ({} bytes) as {}", path.display(), input.len(), mode.as_str());
    Ok(convert(&input, mode, config))
}

/// Convert a file and write the text rendering to `output_path`.
///
/// Uses an atomic write (temp file in the destination directory + persist).
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    mode: OutputMode,
    config: &NormalizeConfig,
) -> Result<ConversionOutput, MathdownError> {
    let output = convert_file(input_path, mode, config)?;
    write_output(output_path, &output.to_text())?;
    Ok(output)
}

/// Atomically write `contents` to `path`, creating parent directories.
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<(), MathdownError> {
    let path = path.as_ref();
    let write_err = |source| MathdownError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
