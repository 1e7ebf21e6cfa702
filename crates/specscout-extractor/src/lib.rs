//! SpecScout Extractor
//!
//! Turns the text of a product datasheet into a product name, a list of raw
//! characteristics and, when one can be found, a weight in grams.
//!
//! # Overview
//!
//! Two engines implement the same [`Engine`] contract:
//!
//! - [`PatternExtractor`]: deterministic regex rules, no network access.
//! - [`SemanticExtractor`]: a structured-output call to a language model,
//!   guarded by a keyword pre-scan, bounded retries and strict schema
//!   validation.
//!
//! Whatever the engine, weights go through the same [`normalize`] /
//! [`weight_of`] path, so `1.2 kg`, `1,200 g` and `42.3 oz` all end up as an
//! integer number of grams.
//!
//! # Architecture
//!
//! ```text
//! text → Engine::run → Extraction { name, characteristics } → weight_of → Grams
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use specscout_extractor::{AbortSignal, Engine, ExtractorConfig, SemanticExtractor};
//! use specscout_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::new("api-key", "gemini-2.0-flash")?;
//! let engine = SemanticExtractor::new(provider, ExtractorConfig::default())?;
//!
//! let extraction = engine.run("Patch antenna\nWeight: 45 g\n", &AbortSignal::new()).await?;
//! println!("{:?} weighs {:?}", extraction.name, extraction.weight());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod keywords;
mod normalizer;
mod pattern;
mod prompt;
mod retry;
mod schema;
mod semantic;


pub use config::{ExtractorConfig, RetryPolicy};
pub use engine::{AbortSignal, Engine, Extraction};
pub use error::ExtractorError;
pub use keywords::{has_weight_keyword, keyword_spans};
pub use normalizer::{normalize, normalize_last, weight_of, NotConvertible};
pub use pattern::{PatternExtractor, WeightRule};
pub use prompt::{truncate_chars, PromptBuilder};
pub use retry::{retry_with_backoff, Backoff, RetryError};
pub use schema::{parse_response, CharacteristicResponse, ProductResponse, RESPONSE_SCHEMA};
pub use semantic::SemanticExtractor;
