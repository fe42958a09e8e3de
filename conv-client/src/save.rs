//! Writing converted results to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use conv_core::OutputFormat;

use crate::error::ConversionError;

/// Suffix inserted before the new extension of a converted file.
pub const CONVERTED_SUFFIX: &str = "_converted";

/// Name of the result file for a given source file and output format.
///
/// `report.csv` converted to json becomes `report_converted.json`. Only the
/// last extension is replaced and only the final path component is kept.
/// Names without an extension (including dot-files) get the suffix appended.
#[must_use]
pub fn output_file_name(source_file_name: &str, format: OutputFormat) -> String {
    let base = Path::new(source_file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source_file_name);

    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };

    format!("{stem}{CONVERTED_SUFFIX}.{}", format.extension())
}

/// Write `content` as `file_name` inside `destination`.
///
/// The destination directory must already exist; it is never created.
///
/// # Errors
///
/// Returns `ConversionError::Save` carrying the content when the directory is
/// missing or the write fails.
pub fn save_result(
    destination: &Path,
    file_name: &str,
    content: &[u8],
) -> Result<PathBuf, ConversionError> {
    let path = destination.join(file_name);

    if !destination.is_dir() {
        return Err(ConversionError::Save {
            path,
            content: content.to_vec(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("destination folder {} does not exist", destination.display()),
            ),
        });
    }

    match fs::write(&path, content) {
        Ok(()) => Ok(path),
        Err(source) => Err(ConversionError::Save {
            path,
            content: content.to_vec(),
            source,
        }),
    }
}
