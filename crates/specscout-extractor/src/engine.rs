//! The common extraction contract
//!
//! Both the pattern engine and the semantic engine implement [`Engine`]. The
//! caller picks one by configuration and drives it through the same flow:
//! check relevance, run, then normalize the characteristics it produced.

use crate::error::ExtractorError;
use crate::normalizer::weight_of;
use specscout_domain::{Grams, RawCharacteristic};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Engine output for one document, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Product name, if one was found
    pub name: Option<String>,

    /// Characteristics in document order
    pub characteristics: Vec<RawCharacteristic>,
}

impl Extraction {
    /// Normalized weight of the extracted characteristics
    pub fn weight(&self) -> Option<Grams> {
        weight_of(&self.characteristics)
    }
}

/// Run-level abort flag
///
/// Cloned into every worker. Once tripped it stays tripped; engines check it
/// before each external call.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    /// Create an untripped signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the signal has been tripped
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An extraction strategy
pub trait Engine: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Whether the text is worth running through this engine at all
    ///
    /// The default accepts everything.
    fn is_relevant(&self, _text: &str) -> bool {
        true
    }

    /// Extract a name and characteristics from the aggregated document text
    fn run(
        &self,
        text: &str,
        abort: &AbortSignal,
    ) -> impl Future<Output = Result<Extraction, ExtractorError>> + Send;
}
