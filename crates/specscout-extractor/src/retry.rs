//! Retry with exponential backoff
//!
//! [`retry_with_backoff`] wraps a single fallible async operation. The caller
//! decides which errors are worth retrying; everything else stops the loop on
//! the spot. Delays follow [`RetryPolicy::nominal_delay`] plus optional
//! jitter, and never shrink from one retry to the next.

use crate::config::RetryPolicy;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Why [`retry_with_backoff`] gave up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The operation failed with an error classified as not retryable
    Permanent {
        /// Attempts made, including the failing one
        attempts: u32,
        /// The error
        error: E,
    },

    /// Every attempt failed with a retryable error
    Exhausted {
        /// Attempts made
        attempts: u32,
        /// The last error seen
        last_error: E,
    },
}

/// Delay sequence for one retry loop
#[derive(Debug)]
pub struct Backoff<'a> {
    policy: &'a RetryPolicy,
    retry: u32,
    previous: Duration,
}

impl<'a> Backoff<'a> {
    /// Start a fresh delay sequence
    pub fn new(policy: &'a RetryPolicy) -> Self {
        Self {
            policy,
            retry: 0,
            previous: Duration::ZERO,
        }
    }

    /// Delay before the next retry
    pub fn next_delay(&mut self) -> Duration {
        self.retry = self.retry.saturating_add(1);
        let nominal = self.policy.nominal_delay(self.retry);
        let cap = Duration::from_millis(self.policy.max_delay_ms);

        // Unvalidated policies may carry NaN or out-of-range jitter
        let jitter = if self.policy.jitter.is_finite() {
            self.policy.jitter.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let jittered = if jitter > 0.0 {
            let extra = rand::thread_rng().gen_range(0.0..=jitter);
            nominal.mul_f64(1.0 + extra)
        } else {
            nominal
        };

        let delay = jittered.min(cap).max(self.previous);
        self.previous = delay;
        delay
    }
}

/// Run `op` until it succeeds, fails permanently, or runs out of attempts
///
/// - `op` receives the 1-based attempt number.
/// - `classify` returns `true` for errors worth retrying.
/// - `on_retry` is told about each retry before sleeping: the attempt that
///   failed, its error, and the delay about to be waited.
pub async fn retry_with_backoff<T, E, Op, Fut, C, R>(
    policy: &RetryPolicy,
    mut op: Op,
    classify: C,
    mut on_retry: R,
) -> Result<T, RetryError<E>>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
    R: FnMut(u32, &E, Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = Backoff::new(policy);
    let mut attempt = 1;

    loop {
        let error = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !classify(&error) {
            return Err(RetryError::Permanent {
                attempts: attempt,
                error,
            });
        }
        if attempt >= max_attempts {
            return Err(RetryError::Exhausted {
                attempts: attempt,
                last_error: error,
            });
        }

        let delay = backoff.next_delay();
        on_retry(attempt, &error, delay);
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
