//! Trait definitions for the packshot generation pipeline.
//!
//! The inference service is a black box reached through [`InferenceDriver`]:
//! instruction text plus optional images in, generated text or images out.

use async_trait::async_trait;
use packshot_core::{GenerateRequest, GenerateResponse};
use packshot_error::PackshotResult;
use std::sync::Arc;

/// In-process contract with the external inference service.
///
/// Implementations must resolve in bounded time, either with a response or an
/// error. Retry, if any, belongs to the implementation.
#[async_trait]
pub trait InferenceDriver: Send + Sync {
    /// Executes one inference request.
    async fn generate(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Default model used when the request does not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D> InferenceDriver for Arc<D>
where
    D: InferenceDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
