//! Pipeline tuning knobs.

use crate::BillingPolicy;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Models used by each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct StageModels {
    /// Model for the forensic audit (vision in, text out)
    audit: String,
    /// Model for shot planning (text in, JSON out)
    plan: String,
    /// Model for rendering (text + images in, image out)
    render: String,
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            audit: "gemini-2.5-flash".to_string(),
            plan: "gemini-2.5-flash".to_string(),
            render: "gemini-2.5-flash-image".to_string(),
        }
    }
}

/// Settings for one pipeline instance.
///
/// # Examples
///
/// ```
/// use packshot_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default().with_concurrency_limit(2usize);
/// assert_eq!(*config.concurrency_limit(), 2);
/// assert_eq!(*config.max_edge(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct PipelineConfig {
    /// Longest edge, in pixels, of any asset sent to the service
    max_edge: u32,
    /// JPEG quality used when an oversized asset is re-encoded
    jpeg_quality: u8,
    /// Render calls in flight at once
    concurrency_limit: usize,
    /// Per-stage model selection
    models: StageModels,
    /// How the caller should bill a finished batch
    billing: BillingPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_edge: 1024,
            jpeg_quality: 85,
            concurrency_limit: 3,
            models: StageModels::default(),
            billing: BillingPolicy::default(),
        }
    }
}
