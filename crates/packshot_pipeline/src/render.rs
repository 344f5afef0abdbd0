//! Production rendering: one inference call per shot.

use crate::prompt::render_inputs;
use async_trait::async_trait;
use packshot_core::{GenerateRequest, Message, Modality, RenderTask, RenderedImage, Role};
use packshot_error::{PackshotResult, PipelineError, PipelineErrorKind};
use packshot_interface::InferenceDriver;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Turns one render task into one image.
///
/// The batch executor only sees this trait, so tests can drive it with stubs.
#[async_trait]
pub trait ShotRenderer: Send + Sync {
    /// Renders `task`, or fails without side effects on other tasks.
    async fn render(&self, task: &RenderTask) -> PackshotResult<RenderedImage>;
}

#[async_trait]
impl<R: ShotRenderer + ?Sized> ShotRenderer for Arc<R> {
    async fn render(&self, task: &RenderTask) -> PackshotResult<RenderedImage> {
        (**self).render(task).await
    }
}

/// Renders shots through an inference driver.
#[derive(Debug)]
pub struct ProductionRenderer<D> {
    driver: Arc<D>,
    model: String,
}

impl<D: InferenceDriver> ProductionRenderer<D> {
    /// Creates a renderer calling `model` through `driver`.
    pub fn new(driver: Arc<D>, model: impl Into<String>) -> Self {
        Self {
            driver,
            model: model.into(),
        }
    }

    fn request(&self, task: &RenderTask) -> PackshotResult<GenerateRequest> {
        GenerateRequest::builder()
            .messages(vec![Message::new(Role::User, render_inputs(task))])
            .model(Some(self.model.clone()))
            .response_modalities(vec![Modality::Text, Modality::Image])
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::Builder(e.to_string())).into())
    }
}

#[async_trait]
impl<D: InferenceDriver> ShotRenderer for ProductionRenderer<D> {
    #[instrument(skip_all, fields(index = task.index(), model = %self.model))]
    async fn render(&self, task: &RenderTask) -> PackshotResult<RenderedImage> {
        let request = self.request(task)?;
        let response = self.driver.generate(&request).await?;

        let (mime, bytes) = response.first_image().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::NoImageProduced {
                index: *task.index(),
            })
        })?;
        let media_type = mime.unwrap_or("image/png");
        debug!(media_type, len = bytes.len(), "Shot rendered");

        Ok(RenderedImage::new(*task.index(), media_type, bytes.to_vec()))
    }
}
