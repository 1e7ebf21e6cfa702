//! Weight threshold filter

use specscout_domain::{Grams, ProductRecord};

/// What the filter decided for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Weight known and not above the limit
    Emit,
    /// Weight known and above the limit
    OverLimit,
    /// No weight could be found
    NoWeight,
}

/// Keeps records whose weight does not exceed a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightFilter {
    limit: Grams,
}

impl WeightFilter {
    /// Create a filter with the given limit
    pub fn new(limit: Grams) -> Self {
        Self { limit }
    }

    /// The limit in use
    pub fn limit(&self) -> Grams {
        self.limit
    }

    /// Decide whether `record` is emitted
    pub fn verdict(&self, record: &ProductRecord) -> FilterVerdict {
        match record.weight_grams {
            None => FilterVerdict::NoWeight,
            Some(_) if record.is_within(self.limit) => FilterVerdict::Emit,
            Some(_) => FilterVerdict::OverLimit,
        }
    }
}
