//! Product records - one per successfully extracted datasheet

use crate::{Grams, RawCharacteristic};

/// A product extracted from one document
///
/// Created once per successfully extracted file and never mutated afterwards.
/// Whether it is emitted depends on `weight_grams` and the configured limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Product name (best effort; falls back to the file stem)
    pub name: String,

    /// Source file name (no directory component)
    pub source_file: String,

    /// Characteristics in extraction order
    pub characteristics: Vec<RawCharacteristic>,

    /// Normalized weight, if any characteristic converted
    pub weight_grams: Option<Grams>,
}

impl ProductRecord {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        source_file: impl Into<String>,
        characteristics: Vec<RawCharacteristic>,
        weight_grams: Option<Grams>,
    ) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            characteristics,
            weight_grams,
        }
    }

    /// Whether the record has a weight that does not exceed `limit`
    pub fn is_within(&self, limit: Grams) -> bool {
        self.weight_grams.is_some_and(|w| w.within(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(weight: Option<u64>) -> ProductRecord {
        ProductRecord::new(
            "Patch Antenna",
            "patch.pdf",
            vec![RawCharacteristic::new("Weight", "1.2 kg")],
            weight.map(Grams::new),
        )
    }

    #[test]
    fn test_within_limit() {
        assert!(!record(Some(1200)).is_within(Grams::new(1000)));
        assert!(record(Some(1200)).is_within(Grams::new(1500)));
        assert!(record(Some(1000)).is_within(Grams::new(1000)));
    }

    #[test]
    fn test_missing_weight_is_never_within() {
        assert!(!record(None).is_within(Grams::new(u64::MAX)));
    }
}
