//! Configuration for a scan run

use serde::{Deserialize, Serialize};
use specscout_domain::Grams;

/// Default number of files processed concurrently
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Configuration for the scan orchestrator
///
/// # Examples
///
/// ```
/// use specscout_scanner::ScanConfig;
///
/// let config = ScanConfig::new(1_000);
/// assert_eq!(config.effective_concurrency(), 4);
///
/// let config = ScanConfig::new(1_000).with_test_mode(true);
/// assert_eq!(config.effective_concurrency(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Records heavier than this many grams are filtered out
    pub weight_limit_grams: u64,

    /// Stop after the first relevant file
    #[serde(default)]
    pub test_mode: bool,

    /// Files processed at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl ScanConfig {
    /// Configuration with the given weight limit and default settings
    pub fn new(weight_limit_grams: u64) -> Self {
        Self {
            weight_limit_grams,
            test_mode: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Enable or disable single-item test mode
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Set the worker pool size
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Weight limit as [`Grams`]
    pub fn weight_limit(&self) -> Grams {
        Grams::new(self.weight_limit_grams)
    }

    /// Pool size actually used: always 1 in test mode
    pub fn effective_concurrency(&self) -> usize {
        if self.test_mode {
            1
        } else {
            self.concurrency
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_concurrency_invalid() {
        assert!(ScanConfig::new(10).with_concurrency(0).validate().is_err());
        assert!(ScanConfig::new(10).validate().is_ok());
    }

    #[test]
    fn test_weight_limit() {
        assert_eq!(ScanConfig::new(1_500).weight_limit(), Grams::new(1_500));
    }
}
