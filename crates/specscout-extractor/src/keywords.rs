//! Weight keyword detection
//!
//! Both engines share one keyword set (`weight`, `mass`). The semantic engine
//! uses [`has_weight_keyword`] as a cheap pre-scan before spending a model
//! call; the pattern engine uses [`keyword_spans`] to anchor its inline and
//! fallback rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Whole-word keyword, with simple plural forms (`weights`, `masses`)
static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:weight|mass)(?:es|s)?\b").expect("keyword regex is valid")
});

/// Whether `text` mentions a weight keyword anywhere
pub fn has_weight_keyword(text: &str) -> bool {
    KEYWORD_RE.is_match(text)
}

/// Byte spans of every keyword occurrence, in document order
pub fn keyword_spans(text: &str) -> Vec<Range<usize>> {
    KEYWORD_RE.find_iter(text).map(|m| m.range()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_keywords_case_insensitive() {
        assert!(has_weight_keyword("Net WEIGHT: 2 kg"));
        assert!(has_weight_keyword("mass 12 g"));
        assert!(has_weight_keyword("Weights and dimensions"));
        assert!(has_weight_keyword("Masses"));
    }

    #[test]
    fn test_requires_whole_words() {
        assert!(!has_weight_keyword("Massachusetts office"));
        assert!(!has_weight_keyword("lightweighted design"));
        assert!(!has_weight_keyword("Frequency: 2.4 GHz"));
    }

    #[test]
    fn test_keyword_spans_in_order() {
        let text = "Weight: 1 kg\nMass: 2 kg";
        let spans = keyword_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].clone()], "Weight");
        assert_eq!(&text[spans[1].clone()], "Mass");
    }
}
