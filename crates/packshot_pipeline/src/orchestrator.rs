//! End-to-end batch generation: normalize, audit, plan, render.

use crate::{
    BatchExecutor, ForensicAuditor, PipelineConfig, ProductionRenderer, StrategyPlanner,
    normalize_blocking,
};
use futures::future::join_all;
use packshot_core::{
    BatchResult, GenerationRequest, RenderContext, RenderTask, ShotStrategy,
};
use packshot_error::PackshotResult;
use packshot_interface::InferenceDriver;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One configured generation pipeline sharing a single inference driver.
///
/// Degraded audits and plans are absorbed, so a run only ever comes back
/// short, never aborted. An empty [`BatchResult`] means every render failed.
#[derive(Debug)]
pub struct Pipeline<D> {
    config: PipelineConfig,
    auditor: ForensicAuditor<D>,
    planner: StrategyPlanner<D>,
    renderer: ProductionRenderer<D>,
    executor: BatchExecutor,
}

impl<D: InferenceDriver> Pipeline<D> {
    /// Wires every stage to `driver` using the models in `config`.
    pub fn new(driver: Arc<D>, config: PipelineConfig) -> Self {
        let models = config.models();
        Self {
            auditor: ForensicAuditor::new(Arc::clone(&driver), models.audit()),
            planner: StrategyPlanner::new(Arc::clone(&driver), models.plan()),
            renderer: ProductionRenderer::new(driver, models.render()),
            executor: BatchExecutor::new(*config.concurrency_limit()),
            config,
        }
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Produces up to `pack_size` images for `request`.
    #[instrument(skip_all, fields(mode = %request.mode(), pack_size = %request.pack_size()))]
    pub async fn run(&self, request: &GenerationRequest) -> PackshotResult<BatchResult> {
        let max_edge = *self.config.max_edge();
        let quality = *self.config.jpeg_quality();
        let assets = join_all(
            request
                .assets()
                .cloned()
                .map(|asset| normalize_blocking(asset, max_edge, quality)),
        )
        .await;

        // Attachment order puts the primary first.
        let primary = assets.first().unwrap_or(request.primary());
        let audit = self.auditor.audit(primary).await;
        if audit.is_fallback() {
            warn!("Continuing with fallback audit report");
        }

        let planned = self.planner.plan(&audit, request).await;
        let strategy = ShotStrategy::from_planned(planned, *request.pack_size(), *request.mode());
        if *strategy.padded() > 0 {
            warn!(padded = strategy.padded(), "Shot strategy padded with placeholders");
        }

        let context = Arc::new(RenderContext::new(
            *request.mode(),
            assets,
            audit,
            request.brand().clone(),
        ));
        let tasks = RenderTask::from_shots(strategy.into_shots(), context);

        let output = self.executor.execute(&self.renderer, &tasks).await;
        let result = BatchResult::new(*request.pack_size(), output.images, output.failures);

        info!(
            succeeded = result.len(),
            failed = result.failures().len(),
            partial = result.is_partial(),
            "Generation finished"
        );
        Ok(result)
    }
}
