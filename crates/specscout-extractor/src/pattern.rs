//! Deterministic pattern-based extraction
//!
//! The pattern engine reads the whole aggregated document text and applies a
//! fixed set of rules:
//!
//! - every `Label: value` line becomes a characteristic, in document order;
//! - the product name is the first line that looks like a title;
//! - weight is found by the first rule that succeeds:
//!   1. a `Label: value` characteristic whose label mentions weight or mass
//!      and whose value converts,
//!   2. a keyword followed closely by a quantity (`Weight ≈ 1.2 kg`),
//!   3. a looser scan of the text around each keyword.
//!
//! Missing a weight is a recall miss, not an error.

use crate::engine::{AbortSignal, Engine, Extraction};
use crate::error::ExtractorError;
use crate::keywords::keyword_spans;
use crate::normalizer::{find_quantity, normalize, normalize_last, weight_of};
use crate::prompt::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;
use specscout_domain::RawCharacteristic;
use tracing::debug;

/// Characters after a keyword searched by the inline rule
pub const INLINE_WINDOW_CHARS: usize = 40;

/// Characters after a keyword searched by the fallback rule
pub const FALLBACK_AFTER_CHARS: usize = 100;

/// Characters before a keyword searched by the fallback rule
pub const FALLBACK_BEFORE_CHARS: usize = 60;

/// Longest product name kept
pub const MAX_NAME_CHARS: usize = 120;

/// Label added by the inline rule
pub const INLINE_LABEL: &str = "Weight";

/// Label added by the fallback rule
pub const FALLBACK_LABEL: &str = "Weight (Extracted)";

static CHARACTERISTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([\w \t/().-]+):[ \t]*(.*)$").expect("characteristic regex is valid")
});

/// Optional separator and comparator between a keyword and its quantity
static INLINE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:[:=\-]\s*)?(?:(?:<=?|>=?|~|≈|max\.?|approx\.?)\s*)?")
        .expect("inline prefix regex is valid")
});

/// Which weight rule produced the weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightRule {
    /// A labelled characteristic
    Labelled,
    /// Keyword followed closely by a quantity
    Inline,
    /// Loose scan around a keyword
    Fallback,
}

/// Regex-driven extractor for name, characteristics and weight
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    /// Create a new pattern extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract name and characteristics from the aggregated document text
    pub fn extract(&self, text: &str) -> Extraction {
        let mut characteristics = characteristics(text);

        let rule = if weight_of(&characteristics).is_some() {
            Some(WeightRule::Labelled)
        } else if let Some(found) = inline_weight(text) {
            characteristics.push(found);
            Some(WeightRule::Inline)
        } else if let Some(found) = fallback_weight(text) {
            characteristics.push(found);
            Some(WeightRule::Fallback)
        } else {
            None
        };

        match rule {
            Some(rule) => debug!("Weight found by {:?} rule", rule),
            None => debug!("No weight found"),
        }

        Extraction {
            name: product_name(text),
            characteristics,
        }
    }
}

impl Engine for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    async fn run(&self, text: &str, _abort: &AbortSignal) -> Result<Extraction, ExtractorError> {
        Ok(self.extract(text))
    }
}

/// Every `Label: value` line, trimmed, in document order
pub fn characteristics(text: &str) -> Vec<RawCharacteristic> {
    CHARACTERISTIC_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let label = caps[1].trim();
            let value = caps[2].trim();
            (!label.is_empty()).then(|| RawCharacteristic::new(label, value))
        })
        .collect()
}

/// First non-empty line with a letter that is not itself a `Label: value` line
pub fn product_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| line.chars().any(char::is_alphabetic) && !CHARACTERISTIC_RE.is_match(line))
        .map(|line| truncate_chars(line, MAX_NAME_CHARS).trim_end().to_string())
}

fn inline_weight(text: &str) -> Option<RawCharacteristic> {
    keyword_spans(text).into_iter().find_map(|span| {
        let window = truncate_chars(&text[span.end..], INLINE_WINDOW_CHARS);
        let prefix = INLINE_PREFIX_RE.find(window)?;
        let rest = &window[prefix.end()..];
        let quantity = find_quantity(rest).filter(|m| m.start() == 0)?;
        normalize(quantity.as_str())
            .ok()
            .map(|_| RawCharacteristic::new(INLINE_LABEL, quantity.as_str()))
    })
}

fn fallback_weight(text: &str) -> Option<RawCharacteristic> {
    keyword_spans(text).into_iter().find_map(|span| {
        let after = truncate_chars(&text[span.end..], FALLBACK_AFTER_CHARS);
        let before = chars_before(text, span.start, FALLBACK_BEFORE_CHARS);
        normalize(after)
            .or_else(|_| normalize_last(before))
            .ok()
            .map(|grams| RawCharacteristic::new(FALLBACK_LABEL, grams.to_string()))
    })
}

/// At most `max_chars` characters immediately before byte offset `end`
fn chars_before(text: &str, end: usize, max_chars: usize) -> &str {
    let head = &text[..end];
    if max_chars == 0 {
        return "";
    }
    match head.char_indices().rev().nth(max_chars - 1) {
        Some((start, _)) => &head[start..],
        None => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specscout_domain::Grams;

    fn weight(text: &str) -> Option<u64> {
        PatternExtractor::new().extract(text).weight().map(|g| g.value())
    }

    #[test]
    fn test_labelled_weight() {
        assert_eq!(weight("Weight: 45g"), Some(45));
        assert_eq!(weight("Product X\nNet Mass: 1.2 kg\n"), Some(1200));
        assert_eq!(weight("Weight: 0,45 kg"), Some(450));
    }

    #[test]
    fn test_no_keyword_means_no_weight() {
        let extraction = PatternExtractor::new().extract("Frequency: 2.4 GHz\nGain: 5 dBi\n");
        assert_eq!(extraction.weight(), None);
        assert_eq!(extraction.characteristics.len(), 2);
    }

    #[test]
    fn test_characteristics_in_document_order() {
        let text = "Antenna A\nFrequency: 2.4 GHz \nGain:5 dBi\nConnector (type):  N-female\n";
        let found = characteristics(text);
        assert_eq!(
            found,
            vec![
                RawCharacteristic::new("Frequency", "2.4 GHz"),
                RawCharacteristic::new("Gain", "5 dBi"),
                RawCharacteristic::new("Connector (type)", "N-female"),
            ]
        );
    }

    #[test]
    fn test_characteristics_handle_crlf() {
        let found = characteristics("Weight: 45 g\r\nGain: 3 dBi\r\n");
        assert_eq!(found[0], RawCharacteristic::new("Weight", "45 g"));
        assert_eq!(found[1], RawCharacteristic::new("Gain", "3 dBi"));
    }

    #[test]
    fn test_inline_weight() {
        let extraction = PatternExtractor::new().extract("The unit weight ≈ 1.2 kg overall");
        assert_eq!(extraction.weight(), Some(Grams::new(1200)));
        assert!(extraction
            .characteristics
            .contains(&RawCharacteristic::new(INLINE_LABEL, "1.2 kg")));

        assert_eq!(weight("Mass - max. 300 g"), Some(300));
        assert_eq!(weight("Weight\n450 g"), Some(450));
    }

    #[test]
    fn test_labelled_rule_wins_over_inline() {
        let text = "Weight: 2 kg\nshipping weight 5 kg\n";
        let extraction = PatternExtractor::new().extract(text);
        assert_eq!(extraction.weight(), Some(Grams::new(2000)));
        assert_eq!(extraction.characteristics.len(), 1);
    }

    #[test]
    fn test_fallback_after_keyword() {
        let text = "The weight of the complete assembly including the mounting bracket is 2.5 kg.";
        let extraction = PatternExtractor::new().extract(text);
        assert_eq!(extraction.weight(), Some(Grams::new(2500)));
        assert!(extraction
            .characteristics
            .contains(&RawCharacteristic::new(FALLBACK_LABEL, "2500 g")));
    }

    #[test]
    fn test_fallback_before_keyword() {
        let extraction = PatternExtractor::new().extract("Compact design, 450 g net weight.");
        assert_eq!(extraction.weight(), Some(Grams::new(450)));
        assert!(extraction
            .characteristics
            .contains(&RawCharacteristic::new(FALLBACK_LABEL, "450 g")));
    }

    #[test]
    fn test_keyword_without_quantity_is_a_miss() {
        let extraction = PatternExtractor::new().extract("Weight: TBD\nLightweight radome");
        assert_eq!(extraction.weight(), None);
    }

    #[test]
    fn test_product_name() {
        assert_eq!(
            product_name("\n\n  Omni Antenna OA-24  \nFrequency: 2.4 GHz\n"),
            Some("Omni Antenna OA-24".to_string())
        );
        assert_eq!(
            product_name("Frequency: 2.4 GHz\n12345\nPanel P-5\n"),
            Some("Panel P-5".to_string())
        );
        assert_eq!(product_name("Weight: 1 kg\n"), None);
        assert_eq!(product_name(""), None);
    }

    #[test]
    fn test_product_name_is_capped() {
        let long = "A".repeat(300);
        assert_eq!(product_name(&long).unwrap().chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_chars_before() {
        assert_eq!(chars_before("abcdef", 4, 2), "cd");
        assert_eq!(chars_before("abcdef", 4, 10), "abcd");
        assert_eq!(chars_before("éé x", 6, 3), "é x");
    }

    #[tokio::test]
    async fn test_engine_run_never_fails() {
        let engine = PatternExtractor::new();
        let extraction = engine.run("nothing useful", &AbortSignal::new()).await.unwrap();
        assert_eq!(extraction.weight(), None);
        assert_eq!(extraction.name, Some("nothing useful".to_string()));
    }
}
