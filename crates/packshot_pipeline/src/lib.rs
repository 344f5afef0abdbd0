//! Batch content-generation pipeline.
//!
//! A job flows through five stages: every asset is normalized, the primary
//! asset is audited once, a shot strategy is planned once, and each shot is
//! rendered as an independent task under a concurrency cap. Audit and plan
//! failures degrade to fallbacks; render failures only shorten the batch.
//!
//! ```no_run
//! # async fn demo<D: packshot_interface::InferenceDriver>(
//! #     driver: std::sync::Arc<D>,
//! #     request: packshot_core::GenerationRequest,
//! # ) -> packshot_error::PackshotResult<()> {
//! use packshot_pipeline::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(driver, PipelineConfig::default());
//! let result = pipeline.run(&request).await?;
//! println!("{} of {} images", result.len(), result.requested());
//! # Ok(())
//! # }
//! ```

mod audit;
mod billing;
mod config;
mod executor;
mod normalize;
mod orchestrator;
mod plan;
mod prompt;
mod render;

pub use audit::ForensicAuditor;
pub use billing::BillingPolicy;
pub use config::{PipelineConfig, StageModels};
pub use executor::{BatchExecutor, BatchOutput};
pub use normalize::{fit_longer_edge, normalize, normalize_blocking, try_normalize};
pub use orchestrator::Pipeline;
pub use plan::{StrategyPlanner, parse_shot_list};
pub use prompt::{render_inputs, render_prompt};
pub use render::{ProductionRenderer, ShotRenderer};
