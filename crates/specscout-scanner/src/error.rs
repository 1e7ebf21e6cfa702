//! Error types for scan runs
//!
//! Only setup problems are errors here. Anything that goes wrong with a single
//! file becomes that file's outcome and never aborts the run.

use thiserror::Error;

/// Errors that stop a scan before any file is processed
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input directory could not be read
    #[error("Cannot read directory {path}: {message}")]
    Directory {
        /// Directory path
        path: String,
        /// Underlying cause
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
