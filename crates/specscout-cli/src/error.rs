//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that stop the CLI before or after a scan.
///
/// Per-file problems never show up here; they are part of the scan report.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Semantic engine selected without a credential
    #[error("No API key for the semantic engine. Set GEMINI_API_KEY, pass --api-key or add api_key under [llm] in the config file")]
    MissingApiKey,

    /// Scan setup error
    #[error(transparent)]
    Scan(#[from] specscout_scanner::ScanError),

    /// Model client error
    #[error("Model client error: {0}")]
    Llm(#[from] specscout_llm::LlmError),

    /// Extractor setup error
    #[error("Extractor error: {0}")]
    Extractor(#[from] specscout_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
