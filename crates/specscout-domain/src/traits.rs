//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the extraction core and
//! infrastructure. Implementations live in other crates.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::path::Path;

/// Text extraction or decoding failed for one file
///
/// Always recovered per file: the file is marked failed and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProcessingError {
    /// File that failed
    pub path: String,

    /// Human-readable cause
    pub message: String,
}

impl FileProcessingError {
    /// Create a new error for `path`
    pub fn new(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FileProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to process {}: {}", self.path, self.message)
    }
}

impl Error for FileProcessingError {}

/// Turns a document on disk into page-ordered text
///
/// Implemented by the infrastructure layer (specscout-scanner wraps a PDF
/// decoder). Implementations are synchronous; callers run them on a blocking
/// thread.
pub trait DocumentTextLoader {
    /// Load the text of every page, in page order
    fn load(&self, path: &Path) -> Result<Vec<String>, FileProcessingError>;
}

/// Trait for semantic model operations
///
/// Implemented by the infrastructure layer (specscout-llm)
pub trait LlmProvider {
    /// Error type for model operations
    type Error;

    /// Generate a response constrained to the JSON schema in `schema`
    ///
    /// Returns the raw response text; validating it is the caller's job.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
