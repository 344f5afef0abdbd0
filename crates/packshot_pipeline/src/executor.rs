//! Bounded-concurrency batch execution of render tasks.

use crate::ShotRenderer;
use futures::future::join_all;
use packshot_core::{RenderFailure, RenderTask, RenderedImage};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Instrument, debug, info, info_span, warn};

/// What a batch run produced, both lists ascending by task index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// Successful renders
    pub images: Vec<RenderedImage>,
    /// Tasks that produced nothing
    pub failures: Vec<RenderFailure>,
}

/// Runs render tasks with at most `concurrency_limit` in flight.
///
/// Workers claim the next task index from a shared atomic cursor, so no two
/// workers ever render the same task. Each outcome lands in a slot reserved
/// for its index, which keeps results in task order regardless of completion
/// order.
#[derive(Debug, Clone, Copy)]
pub struct BatchExecutor {
    concurrency_limit: usize,
}

impl BatchExecutor {
    /// Creates an executor. A limit of zero is treated as one.
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    /// Effective concurrency limit.
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Renders every task. Never fails; an all-failed batch yields no images.
    pub async fn execute<R>(&self, renderer: &R, tasks: &[RenderTask]) -> BatchOutput
    where
        R: ShotRenderer + ?Sized,
    {
        if tasks.is_empty() {
            return BatchOutput::default();
        }

        let cursor = AtomicUsize::new(0);
        let slots: Vec<OnceLock<Result<RenderedImage, String>>> =
            (0..tasks.len()).map(|_| OnceLock::new()).collect();
        let workers = self.concurrency_limit.min(tasks.len());

        info!(tasks = tasks.len(), workers, "Starting batch");

        let cursor = &cursor;
        let slots_ref = &slots;
        let runs = (0..workers).map(move |worker| {
            async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    let Some(task) = tasks.get(index) else {
                        break;
                    };
                    let outcome = renderer
                        .render(task)
                        .await
                        .map_err(|e| e.to_string());
                    if let Err(reason) = &outcome {
                        warn!(index, error = %reason, "Render task failed");
                    }
                    // Each index is claimed exactly once, so the slot is empty.
                    let _ = slots_ref[index].set(outcome);
                }
                debug!("Worker finished");
            }
            .instrument(info_span!("render_worker", worker))
        });
        join_all(runs).await;

        let mut output = BatchOutput::default();
        for (index, slot) in slots.into_iter().enumerate() {
            match slot.into_inner() {
                Some(Ok(image)) => output.images.push(image),
                Some(Err(reason)) => output.failures.push(RenderFailure::new(index, reason)),
                None => output
                    .failures
                    .push(RenderFailure::new(index, "task was never run")),
            }
        }

        info!(
            succeeded = output.images.len(),
            failed = output.failures.len(),
            "Batch complete"
        );
        output
    }
}
