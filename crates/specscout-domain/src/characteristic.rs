//! Raw characteristics - unnormalized `label: value` pairs from document text

use std::fmt;

/// Keywords that mark a characteristic (or a span of text) as weight-related.
///
/// Shared by the pattern engine, the semantic pre-scan and weight selection so
/// that both engines agree on what "a weight" is.
pub const WEIGHT_KEYWORDS: [&str; 2] = ["weight", "mass"];

/// A label/value pair extracted from a datasheet, before any normalization.
///
/// A document may yield zero, one or many characteristics with the same label;
/// no uniqueness is implied.
///
/// # Examples
///
/// ```
/// use specscout_domain::RawCharacteristic;
///
/// let c = RawCharacteristic::new("Weight", "1.2 kg");
/// assert!(c.is_weight());
/// assert_eq!(c.to_string(), "Weight: 1.2 kg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawCharacteristic {
    /// Label as written in the source (e.g. "Weight", "Frequency Range")
    pub label: String,

    /// Literal value string (e.g. "1.2 kg", "2.4-2.5 GHz")
    pub value: String,
}

impl RawCharacteristic {
    /// Create a new characteristic
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Whether the label names a weight or mass (case-insensitive substring match)
    ///
    /// Labels such as "Weight (without bracket)" or "Net Mass" count.
    pub fn is_weight(&self) -> bool {
        let label = self.label.to_lowercase();
        WEIGHT_KEYWORDS.iter().any(|kw| label.contains(kw))
    }
}

impl fmt::Display for RawCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_labels() {
        assert!(RawCharacteristic::new("Weight", "45 g").is_weight());
        assert!(RawCharacteristic::new("MASS", "45 g").is_weight());
        assert!(RawCharacteristic::new("Weight (with mount)", "1 kg").is_weight());
        assert!(!RawCharacteristic::new("Frequency", "2.4 GHz").is_weight());
    }

    #[test]
    fn test_display() {
        let c = RawCharacteristic::new("Gain", "5 dBi");
        assert_eq!(c.to_string(), "Gain: 5 dBi");
    }
}
