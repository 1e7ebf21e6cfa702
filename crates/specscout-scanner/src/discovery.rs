//! Input file discovery

use crate::error::ScanError;
use std::path::{Path, PathBuf};

/// Extension recognized as a datasheet, compared case-insensitively
pub const PDF_EXTENSION: &str = "pdf";

/// Regular files directly inside `dir`, sorted by file name
///
/// Subdirectories are not descended into.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let directory_error = |e: std::io::Error| ScanError::Directory {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(directory_error)? {
        let entry = entry.map_err(directory_error)?;
        if entry.file_type().map_err(directory_error)?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Whether `path` has the PDF extension
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// File name of `path` for reports, lossily converted
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
