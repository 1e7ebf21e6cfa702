//! Per-file extraction outcomes

use std::fmt;

use crate::ProductRecord;

/// Why a file was skipped without producing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Same bytes as a file processed earlier in the run
    Duplicate,

    /// Not a recognized document extension
    WrongExtension,

    /// Pre-scan found no weight keyword; the model was not called
    NoKeywordMatch,

    /// Not selected in single-item test mode
    TestMode,

    /// The run was aborted before this file reached its external call
    Aborted,
}

impl SkipReason {
    /// Stable machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Duplicate => "duplicate",
            SkipReason::WrongExtension => "wrong-extension",
            SkipReason::NoKeywordMatch => "no-keyword-match",
            SkipReason::TestMode => "test-mode",
            SkipReason::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why processing a file failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The file could not be read or decoded
    FileProcessing(String),

    /// The semantic model answered, but not in the expected shape
    SchemaValidation(String),

    /// Every attempt hit a transient service error
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Last transient error seen
        last_error: String,
    },

    /// Non-transient model service error (auth, malformed request, ...)
    Service(String),

    /// A single call exceeded its timeout and was not retried further
    Timeout,

    /// Unexpected internal failure (e.g. a worker task panicked)
    Internal(String),
}

impl FailureReason {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::FileProcessing(_) => "file-processing",
            FailureReason::SchemaValidation(_) => "schema-validation",
            FailureReason::RetriesExhausted { .. } => "retries-exhausted",
            FailureReason::Service(_) => "service",
            FailureReason::Timeout => "timeout",
            FailureReason::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::FileProcessing(msg) => write!(f, "file-processing: {}", msg),
            FailureReason::SchemaValidation(msg) => write!(f, "schema-validation: {}", msg),
            FailureReason::RetriesExhausted { attempts, last_error } => write!(
                f,
                "retries-exhausted after {} attempt(s): {}",
                attempts, last_error
            ),
            FailureReason::Service(msg) => write!(f, "service: {}", msg),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::Internal(msg) => write!(f, "internal: {}", msg),
        }
    }
}

/// What happened to one file. Every processed file yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A record was extracted (it may still be filtered out by weight)
    Success(ProductRecord),

    /// The file was intentionally not extracted
    Skipped(SkipReason),

    /// Extraction failed for this file; the run continues
    Failed(FailureReason),
}

impl ExtractionOutcome {
    /// The record, if extraction succeeded
    pub fn record(&self) -> Option<&ProductRecord> {
        match self {
            ExtractionOutcome::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Short label for reporting ("success", "skipped:duplicate", ...)
    pub fn label(&self) -> String {
        match self {
            ExtractionOutcome::Success(_) => "success".to_string(),
            ExtractionOutcome::Skipped(reason) => format!("skipped:{}", reason),
            ExtractionOutcome::Failed(reason) => format!("failed:{}", reason.kind()),
        }
    }
}
