//! Retry-wrapped inference driver.

use crate::{RateLimiter, RetryConfig, retry_with_backoff};
use async_trait::async_trait;
use packshot_core::{GenerateRequest, GenerateResponse};
use packshot_error::PackshotResult;
use packshot_interface::InferenceDriver;
use std::sync::Arc;
use tracing::instrument;

/// Wraps a driver with rate limiting and bounded retry on transient failure.
///
/// Each attempt takes its own limiter slot, so a request waiting out a
/// backoff does not hold a concurrency permit.
#[derive(Debug)]
pub struct RetryingDriver<D> {
    inner: D,
    retry: RetryConfig,
    limiter: Option<Arc<RateLimiter>>,
}

impl<D: InferenceDriver> RetryingDriver<D> {
    /// Wraps `inner` with the given retry policy and no rate limit.
    pub fn new(inner: D, retry: RetryConfig) -> Self {
        Self {
            inner,
            retry,
            limiter: None,
        }
    }

    /// Adds a rate limiter shared with other drivers if desired.
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// The wrapped driver.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// The retry policy in effect.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn attempt(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse> {
        let _guard = match &self.limiter {
            Some(limiter) => Some(limiter.acquire().await?),
            None => None,
        };
        self.inner.generate(req).await
    }
}

#[async_trait]
impl<D: InferenceDriver> InferenceDriver for RetryingDriver<D> {
    #[instrument(skip(self, req), fields(provider = self.inner.provider_name()))]
    async fn generate(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse> {
        retry_with_backoff(&self.retry, || self.attempt(req)).await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
