//! Error types for the extractors

use specscout_domain::{ExtractionOutcome, FailureReason, SkipReason};
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// The text never mentions a weight keyword; the model was not called
    #[error("No weight keyword in text")]
    NoKeywordMatch,

    /// The model response did not match the response schema
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    /// Every attempt failed with a transient error
    #[error("Retries exhausted after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Last transient error seen
        last_error: String,
    },

    /// The model service rejected the request permanently
    #[error("Service error: {0}")]
    Service(String),

    /// Every attempt hit the per-call timeout
    #[error("Extraction timeout")]
    Timeout,

    /// The run was aborted before the call could be made
    #[error("Extraction aborted")]
    Aborted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// The per-file outcome this error maps to
    pub fn outcome(&self) -> ExtractionOutcome {
        match self {
            ExtractorError::NoKeywordMatch => ExtractionOutcome::Skipped(SkipReason::NoKeywordMatch),
            ExtractorError::Aborted => ExtractionOutcome::Skipped(SkipReason::Aborted),
            ExtractorError::SchemaValidation(msg) => {
                ExtractionOutcome::Failed(FailureReason::SchemaValidation(msg.clone()))
            }
            ExtractorError::RetriesExhausted {
                attempts,
                last_error,
            } => ExtractionOutcome::Failed(FailureReason::RetriesExhausted {
                attempts: *attempts,
                last_error: last_error.clone(),
            }),
            ExtractorError::Service(msg) => ExtractionOutcome::Failed(FailureReason::Service(msg.clone())),
            ExtractorError::Timeout => ExtractionOutcome::Failed(FailureReason::Timeout),
            ExtractorError::Config(msg) => ExtractionOutcome::Failed(FailureReason::Internal(msg.clone())),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::SchemaValidation(e.to_string())
    }
}
