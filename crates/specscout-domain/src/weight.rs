//! Canonical weight value

use std::fmt;

/// A weight expressed as a whole number of grams
///
/// Always non-negative. Produced by the weight normalizer, which applies one
/// rounding policy (nearest gram, ties away from zero) to exact unit
/// conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grams(u64);

impl Grams {
    /// Create a weight from a gram count
    pub const fn new(grams: u64) -> Self {
        Self(grams)
    }

    /// Gram count
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether this weight does not exceed `limit`
    ///
    /// # Examples
    ///
    /// ```
    /// use specscout_domain::Grams;
    ///
    /// assert!(Grams::new(1000).within(Grams::new(1000)));
    /// assert!(!Grams::new(1200).within(Grams::new(1000)));
    /// ```
    pub fn within(&self, limit: Grams) -> bool {
        self.0 <= limit.0
    }
}

impl From<u64> for Grams {
    fn from(grams: u64) -> Self {
        Self(grams)
    }
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} g", self.0)
    }
}
