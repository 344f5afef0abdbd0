//! Retry and rate limiting for inference drivers.
//!
//! [`RetryingDriver`] is the retry-wrapped inference client the pipeline
//! talks to: every call either succeeds or fails after a bounded number of
//! attempts.

mod driver;
mod limiter;
mod retry;

pub use driver::RetryingDriver;
pub use limiter::{RateLimitConfig, RateLimiter, RateLimiterGuard};
pub use retry::{RetryConfig, retry_with_backoff};
