//! SpecScout Domain Layer
//!
//! Core model for extracting product weights from datasheets. This crate has
//! ZERO external dependencies and defines the value objects and collaborator
//! traits that the extractor, scanner and CLI crates build on.
//!
//! ## Key Concepts
//!
//! - **Fingerprint**: content digest used for duplicate detection
//! - **RawCharacteristic**: unnormalized `label: value` pair pulled from text
//! - **Grams**: canonical weight, an integer gram count
//! - **ProductRecord**: one extracted datasheet
//! - **ExtractionOutcome**: what happened to one file (success, skip, failure)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod characteristic;
pub mod fingerprint;
pub mod outcome;
pub mod product;
pub mod traits;
pub mod weight;

// Re-exports for convenience
pub use characteristic::RawCharacteristic;
pub use fingerprint::Fingerprint;
pub use outcome::{ExtractionOutcome, FailureReason, SkipReason};
pub use product::ProductRecord;
pub use traits::{DocumentTextLoader, FileProcessingError, LlmProvider};
pub use weight::Grams;
