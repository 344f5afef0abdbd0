//! Results of a batch run.

use crate::PackSize;
use serde::{Deserialize, Serialize};

/// One successfully rendered image.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RenderedImage {
    /// Index of the originating render task
    index: usize,
    /// MIME type reported by the service
    media_type: String,
    /// Encoded image bytes
    #[getter(skip)]
    bytes: Vec<u8>,
}

impl RenderedImage {
    /// Creates a rendered image.
    pub fn new(index: usize, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            index,
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension matching the media type.
    pub fn extension(&self) -> &'static str {
        match self.media_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

impl std::fmt::Debug for RenderedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedImage")
            .field("index", &self.index)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A render task that produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RenderFailure {
    /// Index of the failed render task
    index: usize,
    /// Error text
    reason: String,
}

impl RenderFailure {
    /// Records a failure at `index`.
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Successful renders in task order, plus a record of what failed.
///
/// The image list may be shorter than the pack size. Callers treat an empty
/// list as a failed generation and a short one as a partial success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BatchResult {
    /// Pack size the caller asked for
    requested: PackSize,
    /// Rendered images, ascending by task index
    images: Vec<RenderedImage>,
    /// Failed tasks, ascending by task index
    failures: Vec<RenderFailure>,
}

impl BatchResult {
    /// Assembles a result. Both lists must already be in index order.
    pub fn new(
        requested: PackSize,
        images: Vec<RenderedImage>,
        failures: Vec<RenderFailure>,
    ) -> Self {
        Self {
            requested,
            images,
            failures,
        }
    }

    /// Number of images produced.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when every task failed.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// True when some, but not all, requested images were produced.
    pub fn is_partial(&self) -> bool {
        !self.images.is_empty() && self.images.len() < self.requested.count()
    }

    /// Consumes the result, returning the images.
    pub fn into_images(self) -> Vec<RenderedImage> {
        self.images
    }
}
