//! Packshot: batch marketing-image generation from product photos.
//!
//! This crate ties the workspace together. It re-exports the pipeline and
//! its data model, loads layered configuration, and hosts the `packshot`
//! command-line caller.
//!
//! ```no_run
//! # async fn demo(request: packshot::GenerationRequest) -> anyhow::Result<()> {
//! use packshot::{AppConfig, GeminiClient, Pipeline, RetryingDriver};
//! use std::sync::Arc;
//!
//! let config = AppConfig::load(None)?;
//! let driver = RetryingDriver::new(GeminiClient::from_env()?, config.retry().clone());
//! let pipeline = Pipeline::new(Arc::new(driver), config.pipeline().clone());
//!
//! let result = pipeline.run(&request).await?;
//! println!("{} images", result.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod app_config;

pub use app_config::{AppConfig, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE};

pub use packshot_core::{
    AssetRole, AuditReport, BatchResult, BrandOverlay, GenerationMode, GenerationRequest,
    GenerationRequestBuilder, PackSize, RenderFailure, RenderTask, RenderedImage, ShotStrategy,
    SourceAsset,
};
pub use packshot_error::{PackshotError, PackshotErrorKind, PackshotResult, RetryableError};
pub use packshot_interface::InferenceDriver;
pub use packshot_pipeline::{
    BatchExecutor, BillingPolicy, Pipeline, PipelineConfig, ShotRenderer, StageModels,
};
pub use packshot_rate_limit::{RateLimitConfig, RateLimiter, RetryConfig, RetryingDriver};

#[cfg(feature = "gemini")]
pub use packshot_models::{GeminiClient, GeminiConfig};
