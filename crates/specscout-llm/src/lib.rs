//! SpecScout LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `specscout-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: scripted, call-counting provider for tests
//! - `GeminiProvider`: Google Gemini `generateContent` with JSON-schema
//!   constrained output
//!
//! # Examples
//!
//! ```
//! use specscout_llm::MockProvider;
//! use specscout_domain::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"name":"X","characteristics":[]}"#);
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(provider.generate_structured("prompt", "{}")).unwrap();
//! assert!(result.contains("characteristics"));
//! assert_eq!(provider.call_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod mock;

use thiserror::Error;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

/// Errors that can occur during model calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Quota or rate limit hit (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Service overloaded or temporarily unavailable (HTTP 5xx)
    #[error("Service overloaded: {0}")]
    Overloaded(String),

    /// The call did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential missing, invalid or not permitted (HTTP 401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Request rejected as malformed (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not available (HTTP 404)
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response envelope could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether retrying the same request may succeed
    ///
    /// Rate limits, overload signals, timeouts and transport errors are
    /// transient. Authentication, malformed requests, missing models and
    /// unreadable responses are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited(_)
                | LlmError::Overloaded(_)
                | LlmError::Timeout
                | LlmError::Communication(_)
        )
    }

    /// Classify an HTTP error status with its body
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            429 => LlmError::RateLimited(body),
            500 | 502 | 503 | 504 => LlmError::Overloaded(format!("HTTP {}: {}", status, body)),
            401 | 403 => LlmError::Authentication(body),
            400 => LlmError::InvalidRequest(body),
            404 => LlmError::ModelNotAvailable(body),
            _ => LlmError::Other(format!("HTTP {}: {}", status, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(LlmError::from_status(429, "quota").is_transient());
        assert!(LlmError::from_status(503, "overloaded").is_transient());
        assert!(LlmError::from_status(500, "oops").is_transient());
        assert!(!LlmError::from_status(401, "bad key").is_transient());
        assert!(!LlmError::from_status(403, "denied").is_transient());
        assert!(!LlmError::from_status(400, "bad request").is_transient());
        assert!(matches!(
            LlmError::from_status(404, "nope"),
            LlmError::ModelNotAvailable(_)
        ));
    }

    #[test]
    fn test_timeout_and_transport_are_transient() {
        assert!(LlmError::Timeout.is_transient());
        assert!(LlmError::Communication("reset".into()).is_transient());
        assert!(!LlmError::InvalidResponse("garbled".into()).is_transient());
    }
}
