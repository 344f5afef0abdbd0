//! Independent units of render work.

use crate::{AuditReport, BrandOverlay, GenerationMode, SourceAsset};
use std::sync::Arc;

/// Inputs shared by every render task of one job.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct RenderContext {
    /// Object- or model-centric output
    mode: GenerationMode,
    /// Normalized assets in attachment order
    assets: Vec<SourceAsset>,
    /// Identity contract from the audit
    audit: AuditReport,
    /// Optional brand identity overlay
    brand: Option<BrandOverlay>,
}

impl RenderContext {
    /// Creates the shared context for a job.
    pub fn new(
        mode: GenerationMode,
        assets: Vec<SourceAsset>,
        audit: AuditReport,
        brand: Option<BrandOverlay>,
    ) -> Self {
        Self {
            mode,
            assets,
            audit,
            brand,
        }
    }
}

/// One shot to render; produces at most one image.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct RenderTask {
    /// Position in the shot strategy
    index: usize,
    /// Shot description
    shot: String,
    /// Job-wide inputs
    context: Arc<RenderContext>,
}

impl RenderTask {
    /// Creates a task at `index`.
    pub fn new(index: usize, shot: impl Into<String>, context: Arc<RenderContext>) -> Self {
        Self {
            index,
            shot: shot.into(),
            context,
        }
    }

    /// Builds one task per shot, indexed by position.
    pub fn from_shots(shots: Vec<String>, context: Arc<RenderContext>) -> Vec<Self> {
        shots
            .into_iter()
            .enumerate()
            .map(|(index, shot)| Self::new(index, shot, Arc::clone(&context)))
            .collect()
    }
}
