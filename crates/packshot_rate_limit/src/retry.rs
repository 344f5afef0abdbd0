//! Bounded retry with exponential backoff.

use packshot_error::RetryableError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Retry configuration for inference calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: usize,
    /// Initial backoff in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff in milliseconds.
    pub max_backoff_ms: u64,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// Retries an operation with exponential backoff.
///
/// Stops at the first success, the first non-retryable error, or after
/// `max_attempts` attempts, returning the last error.
#[instrument(skip(config, operation), fields(max_attempts = config.max_attempts))]
pub async fn retry_with_backoff<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt = 0;
    let mut backoff = config.initial_backoff();

    loop {
        attempt += 1;
        debug!(attempt, "Executing operation");

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if attempt >= config.max_attempts.max(1) {
                    warn!(attempt, error = %err, "All retry attempts exhausted");
                    return Err(err);
                }

                if !err.is_retryable() {
                    warn!(error = %err, "Error is not retryable, failing immediately");
                    return Err(err);
                }

                debug!(backoff_ms = backoff.as_millis(), error = %err, "Retrying after failure");
                sleep(backoff).await;

                backoff = next_backoff(backoff, config);
            }
        }
    }
}

/// Scales the backoff, clamped to `max_backoff`. Unrepresentable products
/// (negative, NaN, overflowing) saturate at the cap.
fn next_backoff(current: Duration, config: &RetryConfig) -> Duration {
    let max = config.max_backoff();
    Duration::try_from_secs_f64(current.as_secs_f64() * config.backoff_multiplier)
        .map_or(max, |scaled| scaled.min(max))
}
