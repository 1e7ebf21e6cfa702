//! Configuration for the extractors

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff parameters for model calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    pub base_delay_ms: u64,

    /// Upper bound for any single delay (milliseconds)
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays
    pub multiplier: f64,

    /// Random extra delay, as a fraction of the nominal delay (0.0 disables)
    pub jitter: f64,
}

impl RetryPolicy {
    /// Nominal delay before retry number `retry` (1-based), without jitter
    pub fn nominal_delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay_ms = self.base_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = delay_ms.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err("retry.base_delay_ms cannot exceed retry.max_delay_ms".to_string());
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err("retry.multiplier must be a finite number >= 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err("retry.jitter must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    /// Five attempts, 2s doubling up to a minute, 10% jitter
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 2_000,
            max_delay_ms: 60_000,
            multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

/// Configuration for the semantic extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum characters of document text sent to the model
    pub max_prompt_chars: usize,

    /// Maximum time for a single model call (seconds)
    pub call_timeout_secs: u64,

    /// Retry policy for transient model failures
    pub retry: RetryPolicy,
}

impl ExtractorConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        self.retry.validate()
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_prompt_chars: 8_000,
            call_timeout_secs: 60,
            retry: RetryPolicy::default(),
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: short timeouts, few quick retries
    pub fn aggressive() -> Self {
        Self {
            max_prompt_chars: 4_000,
            call_timeout_secs: 20,
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay_ms: 500,
                max_delay_ms: 5_000,
                multiplier: 2.0,
                jitter: 0.1,
            },
        }
    }

    /// Lenient preset: long timeouts, patient retries, more context
    pub fn lenient() -> Self {
        Self {
            max_prompt_chars: 16_000,
            call_timeout_secs: 180,
            retry: RetryPolicy {
                max_attempts: 8,
                base_delay_ms: 2_000,
                max_delay_ms: 120_000,
                multiplier: 2.0,
                jitter: 0.2,
            },
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_prompt_chars, 8_000);
    }

    #[test]
    fn test_aggressive_config_is_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
    }

    #[test]
    fn test_lenient_config_is_valid() {
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ExtractorConfig::default();
        config.max_prompt_chars = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.retry.multiplier = 0.5;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.retry.base_delay_ms = config.retry.max_delay_ms + 1;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.retry.jitter = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nominal_delays_grow_and_cap() {
        let policy = RetryPolicy {
            max_attempts: 6,
            base_delay_ms: 1_000,
            max_delay_ms: 5_000,
            multiplier: 2.0,
            jitter: 0.0,
        };
        let delays: Vec<u64> = (1..=5)
            .map(|n| policy.nominal_delay(n).as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 5_000, 5_000]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("call_timeout_secs = 5\n[retry]\nmax_attempts = 2\n").unwrap();
        assert_eq!(parsed.call_timeout_secs, 5);
        assert_eq!(parsed.retry.max_attempts, 2);
        assert_eq!(parsed.retry.base_delay_ms, RetryPolicy::default().base_delay_ms);
        assert_eq!(parsed.max_prompt_chars, 8_000);
    }
}
