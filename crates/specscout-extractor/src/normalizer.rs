//! Weight normalization
//!
//! Turns a free-text quantity such as `1.2 kg`, `1,200 g` or `16 oz` into a
//! whole number of grams. The magnitude is parsed as an exact decimal and
//! multiplied by an exact rational unit factor, so no floating point is
//! involved. The only rounding happens once, at the end: to the nearest gram,
//! ties away from zero.
//!
//! A comma is a thousands separator only in full `1,234` groups that do not
//! start with zero; anywhere else it is a decimal comma (`0,45 kg`, `1,5 kg`).
//! A quantity never starts in the middle of a number.
//!
//! ```
//! use specscout_extractor::normalize;
//!
//! assert_eq!(normalize("1.2 kg").unwrap().value(), 1200);
//! assert_eq!(normalize("Weight: approx. 16 oz").unwrap().value(), 454);
//! assert!(normalize("banana").is_err());
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use specscout_domain::{Grams, RawCharacteristic};
use thiserror::Error;

/// Why a token could not be turned into grams
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotConvertible {
    /// No `magnitude unit` pair was found
    #[error("no weight quantity found")]
    NoQuantity,

    /// A quantity was found but does not fit the integer range
    #[error("weight quantity out of range")]
    OutOfRange,
}

/// Magnitude followed by a mass unit.
///
/// `grouped` is set when the magnitude uses thousands separators. Longer unit
/// spellings come first so leftmost-first alternation picks them.
static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<mag>(?P<grouped>[1-9][0-9]{0,2}(?:,[0-9]{3})+(?:\.[0-9]+)?)|[0-9]+(?:[.,][0-9]+)?|\.[0-9]+)[\s\x{00A0}]*(?P<unit>milligrams?|mg|kilograms?|kilos?|kgs?|grammes?|grams?|gr|g|pounds?|lbs?|ounces?|oz)\b",
    )
    .expect("quantity regex is valid")
});

/// Exact rational factor converting one unit into grams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnitFactor {
    numerator: u128,
    denominator: u128,
}

impl UnitFactor {
    const fn new(numerator: u128, denominator: u128) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    fn for_unit(unit: &str) -> Option<Self> {
        let factor = match unit.to_ascii_lowercase().as_str() {
            "mg" | "milligram" | "milligrams" => Self::new(1, 1_000),
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Self::new(1, 1),
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Self::new(1_000, 1),
            // 1 lb = 453.59237 g (international avoirdupois pound)
            "lb" | "lbs" | "pound" | "pounds" => Self::new(45_359_237, 100_000),
            // 1 oz = 1/16 lb = 28.349523125 g
            "oz" | "ounce" | "ounces" => Self::new(28_349_523_125, 1_000_000_000),
            _ => return None,
        };
        Some(factor)
    }
}

/// A decimal magnitude held as `numerator / denominator`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Magnitude {
    numerator: u128,
    denominator: u128,
}

impl Magnitude {
    fn parse(literal: &str, grouped: bool) -> Result<Self, NotConvertible> {
        let digits: String = if grouped {
            literal.chars().filter(|c| *c != ',').collect()
        } else {
            literal.replace(',', ".")
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        let denominator = u32::try_from(fraction.len())
            .ok()
            .and_then(|len| 10u128.checked_pow(len))
            .ok_or(NotConvertible::OutOfRange)?;

        let mut numerator: u128 = 0;
        for c in whole.chars().chain(fraction.chars()) {
            let digit = c.to_digit(10).ok_or(NotConvertible::NoQuantity)?;
            numerator = numerator
                .checked_mul(10)
                .and_then(|n| n.checked_add(u128::from(digit)))
                .ok_or(NotConvertible::OutOfRange)?;
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Multiply by `factor` and round to the nearest gram, ties away from zero
    fn to_grams(self, factor: UnitFactor) -> Result<Grams, NotConvertible> {
        let numerator = self
            .numerator
            .checked_mul(factor.numerator)
            .ok_or(NotConvertible::OutOfRange)?;
        let denominator = self
            .denominator
            .checked_mul(factor.denominator)
            .ok_or(NotConvertible::OutOfRange)?;

        // floor((2n + d) / 2d) == round-half-up for non-negative n / d
        let rounded = numerator
            .checked_mul(2)
            .and_then(|twice| twice.checked_add(denominator))
            .and_then(|sum| denominator.checked_mul(2).map(|twice_d| sum / twice_d))
            .ok_or(NotConvertible::OutOfRange)?;

        u64::try_from(rounded)
            .map(Grams::new)
            .map_err(|_| NotConvertible::OutOfRange)
    }
}

fn convert(caps: &Captures<'_>) -> Result<Grams, NotConvertible> {
    let factor = UnitFactor::for_unit(&caps["unit"]).ok_or(NotConvertible::NoQuantity)?;
    Magnitude::parse(&caps["mag"], caps.name("grouped").is_some())?.to_grams(factor)
}

/// Quantity matches in `text` that start at a number boundary
///
/// The regex cannot look behind, so a match whose magnitude directly follows a
/// digit, `.` or `,` (the tail of a longer number) is dropped here.
fn quantities(text: &str) -> impl Iterator<Item = Captures<'_>> {
    QUANTITY_RE.captures_iter(text).filter(move |caps| {
        let start = caps.get(0).map_or(0, |m| m.start());
        !text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ',')
    })
}

/// Convert the first `magnitude unit` pair found in `token` into grams
///
/// The pair may appear anywhere in the token, so whole characteristic values
/// such as `approx. 1.2 kg (with bracket)` are accepted.
pub fn normalize(token: &str) -> Result<Grams, NotConvertible> {
    match quantities(token).next() {
        Some(caps) => convert(&caps),
        None => Err(NotConvertible::NoQuantity),
    }
}

/// Like [`normalize`], but converts the last pair found in `token`
///
/// Used when scanning text that precedes a keyword, where the quantity closest
/// to the keyword is the relevant one.
pub fn normalize_last(token: &str) -> Result<Grams, NotConvertible> {
    match quantities(token).last() {
        Some(caps) => convert(&caps),
        None => Err(NotConvertible::NoQuantity),
    }
}

/// Byte range and text of the first quantity literal in `text`, if any
pub(crate) fn find_quantity(text: &str) -> Option<regex::Match<'_>> {
    quantities(text).next().and_then(|caps| caps.get(0))
}

/// Weight of a product: the first weight-labelled characteristic that converts
pub fn weight_of(characteristics: &[RawCharacteristic]) -> Option<Grams> {
    characteristics
        .iter()
        .filter(|c| c.is_weight())
        .find_map(|c| normalize(&c.value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(token: &str) -> u64 {
        normalize(token).unwrap().value()
    }

    #[test]
    fn test_basic_units() {
        assert_eq!(grams("1.2 kg"), 1200);
        assert_eq!(grams("45 g"), 45);
        assert_eq!(grams("45g"), 45);
        assert_eq!(grams("2500 mg"), 3);
        assert_eq!(grams("1 lb"), 454);
        assert_eq!(grams("16 oz"), 454);
    }

    #[test]
    fn test_unit_spellings_case_insensitive() {
        assert_eq!(grams("0.5 KG"), 500);
        assert_eq!(grams("3 Kilograms"), 3000);
        assert_eq!(grams("2 kgs"), 2000);
        assert_eq!(grams("120 grams"), 120);
        assert_eq!(grams("120 gr"), 120);
        assert_eq!(grams("2 Pounds"), 907);
        assert_eq!(grams("8 ounces"), 227);
    }

    #[test]
    fn test_rounding_ties_away_from_zero() {
        assert_eq!(grams("0.5 g"), 1);
        assert_eq!(grams("0.49 g"), 0);
        assert_eq!(grams("0.4 g"), 0);
        assert_eq!(grams("1.5 g"), 2);
        assert_eq!(grams("1500 mg"), 2);
        assert_eq!(grams("1499 mg"), 1);
    }

    #[test]
    fn test_separators_and_spacing() {
        assert_eq!(grams("1,200 g"), 1200);
        assert_eq!(grams("1,250.5 g"), 1251);
        assert_eq!(grams(".5 kg"), 500);
        assert_eq!(grams("12\u{00A0}kg"), 12000);
        assert_eq!(grams("12 \t kg"), 12000);
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(grams("0,45 kg"), 450);
        assert_eq!(grams("1,5 kg"), 1500);
        assert_eq!(grams("1,2345 kg"), 1235);
        assert_eq!(grams("0,450 kg"), 450);
        assert_eq!(grams("Weight: 0,45 kg"), 450);
    }

    #[test]
    fn test_never_starts_inside_a_number() {
        assert_eq!(normalize("1.2.3 kg"), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize("1,2,3 kg"), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize_last("2 kg or 1.2.3 kg").unwrap().value(), 2000);
    }

    #[test]
    fn test_search_not_full_match() {
        assert_eq!(grams("approx. 1.2 kg (with bracket)"), 1200);
        assert_eq!(grams("< 250 g"), 250);
    }

    #[test]
    fn test_unit_must_be_whole_word() {
        assert_eq!(normalize("5 GHz"), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize("50 gauge"), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize("10 green"), Err(NotConvertible::NoQuantity));
    }

    #[test]
    fn test_not_convertible() {
        assert_eq!(normalize("banana"), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize(""), Err(NotConvertible::NoQuantity));
        assert_eq!(normalize("kg"), Err(NotConvertible::NoQuantity));
    }

    #[test]
    fn test_out_of_range_does_not_panic() {
        let huge = format!("{} kg", "9".repeat(60));
        assert_eq!(normalize(&huge), Err(NotConvertible::OutOfRange));

        let long_fraction = format!("1.{} g", "1".repeat(50));
        assert_eq!(normalize(&long_fraction), Err(NotConvertible::OutOfRange));
    }

    #[test]
    fn test_normalize_last() {
        assert_eq!(normalize_last("5 g and then 7 kg").unwrap().value(), 7000);
        assert_eq!(normalize_last("nothing"), Err(NotConvertible::NoQuantity));
    }

    #[test]
    fn test_weight_of_picks_first_convertible_weight() {
        let characteristics = vec![
            RawCharacteristic::new("Gain", "5 dBi"),
            RawCharacteristic::new("Weight", "TBD"),
            RawCharacteristic::new("Net Mass", "1.2 kg"),
            RawCharacteristic::new("Weight (packed)", "2 kg"),
        ];
        assert_eq!(weight_of(&characteristics), Some(Grams::new(1200)));
    }

    #[test]
    fn test_weight_of_ignores_non_weight_labels() {
        let characteristics = vec![RawCharacteristic::new("Connector", "N 50 g")];
        assert_eq!(weight_of(&characteristics), None);
    }
}
