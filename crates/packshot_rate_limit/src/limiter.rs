//! Request-rate and concurrency limiting using governor and a Tokio semaphore.

use derive_getters::Getters;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use packshot_error::{BackendError, PackshotResult};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::Semaphore;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Limits applied to one inference provider. `None` or `0` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests per minute
    rpm: Option<u32>,
    /// Requests in flight at once
    max_concurrent: Option<u32>,
}

impl RateLimitConfig {
    /// Creates a config from explicit limits.
    pub fn new(rpm: Option<u32>, max_concurrent: Option<u32>) -> Self {
        Self {
            rpm,
            max_concurrent,
        }
    }

    /// No limits at all.
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// Rate limiter enforcing RPM and a concurrent-request cap.
///
/// # Example
///
/// ```rust,ignore
/// let limiter = RateLimiter::new(&RateLimitConfig::new(Some(10), Some(2)));
/// let guard = limiter.acquire().await?;
/// // make the call...
/// drop(guard);
/// ```
pub struct RateLimiter {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// Create a new rate limiter from a config.
    pub fn new(config: &RateLimitConfig) -> Self {
        let rpm_limiter = config.rpm.and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))))
        });

        let max_concurrent = config
            .max_concurrent
            .and_then(NonZeroU32::new)
            .map(|n| n.get() as usize)
            .unwrap_or(Semaphore::MAX_PERMITS);
        let concurrent_semaphore = Arc::new(Semaphore::new(max_concurrent));

        Self {
            rpm_limiter,
            concurrent_semaphore,
        }
    }

    /// Waits until the request fits every configured limit.
    ///
    /// The concurrent slot is taken last so it is not held while waiting on
    /// the RPM quota. It is released when the guard drops.
    pub async fn acquire(&self) -> PackshotResult<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        let permit = self
            .concurrent_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| BackendError::new(format!("Rate limiter closed: {}", e)))?;

        Ok(RateLimiterGuard { _permit: permit })
    }

    /// Try to acquire without waiting. Returns `None` if any limit would block.
    pub fn try_acquire(&self) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;
        Some(RateLimiterGuard { _permit: permit })
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .field(
                "available_permits",
                &self.concurrent_semaphore.available_permits(),
            )
            .finish()
    }
}

/// RAII guard releasing the concurrent slot when dropped.
pub struct RateLimiterGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_releases_on_drop() {
        let limiter = RateLimiter::new(&RateLimitConfig::new(Some(100), Some(1)));

        let guard1 = limiter.acquire().await.expect("first acquire");
        assert!(limiter.try_acquire().is_none());

        drop(guard1);

        let _guard2 = limiter.try_acquire().expect("Should acquire after drop");
    }

    #[tokio::test]
    async fn test_rpm_limiting() {
        let limiter = RateLimiter::new(&RateLimitConfig::new(Some(2), Some(10)));

        let _guard1 = limiter.try_acquire().expect("First request");
        let _guard2 = limiter.try_acquire().expect("Second request");

        assert!(limiter.try_acquire().is_none(), "Third request should be rate limited");
    }

    #[tokio::test]
    async fn test_zero_limits_mean_unlimited() {
        let limiter = RateLimiter::new(&RateLimitConfig::new(Some(0), Some(0)));

        let _held = limiter.acquire().await.expect("zero cap does not block");
        for _ in 0..10 {
            let _guard = limiter.try_acquire().expect("Should not be limited");
        }
    }

    #[tokio::test]
    async fn test_unlimited() {
        let limiter = RateLimiter::new(&RateLimitConfig::unlimited());

        for _ in 0..100 {
            let _guard = limiter.try_acquire().expect("Should not be limited");
        }
    }
}
