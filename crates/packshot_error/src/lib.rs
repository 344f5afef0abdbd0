//! Error types for the packshot pipeline.
//!
//! Every concern gets its own location-tracked error struct. They all convert
//! into [`PackshotError`] so stage code can use `?` freely.

mod backend;
mod config;
mod image;
mod inference;
mod json;
mod pipeline;

pub use backend::BackendError;
pub use config::ConfigError;
pub use image::{ImageError, ImageErrorKind};
pub use inference::{InferenceError, InferenceErrorKind, RetryableError};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum PackshotErrorKind {
    /// JSON serialization/deserialization error
    Json(JsonError),
    /// Generic backend error
    Backend(BackendError),
    /// Configuration error
    Config(ConfigError),
    /// Inference service error
    Inference(InferenceError),
    /// Pipeline validation or stage error
    Pipeline(PipelineError),
    /// Image decode/encode error
    Image(ImageError),
}

impl std::fmt::Display for PackshotErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackshotErrorKind::Json(e) => write!(f, "{}", e),
            PackshotErrorKind::Backend(e) => write!(f, "{}", e),
            PackshotErrorKind::Config(e) => write!(f, "{}", e),
            PackshotErrorKind::Inference(e) => write!(f, "{}", e),
            PackshotErrorKind::Pipeline(e) => write!(f, "{}", e),
            PackshotErrorKind::Image(e) => write!(f, "{}", e),
        }
    }
}

/// Packshot error with kind discrimination.
#[derive(Debug)]
pub struct PackshotError(Box<PackshotErrorKind>);

impl PackshotError {
    /// Create a new error from a kind.
    pub fn new(kind: PackshotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PackshotErrorKind {
        &self.0
    }
}

impl RetryableError for PackshotError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            PackshotErrorKind::Inference(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl std::fmt::Display for PackshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Packshot Error: {}", self.0)
    }
}

impl std::error::Error for PackshotError {}

impl<T> From<T> for PackshotError
where
    T: Into<PackshotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for packshot operations.
pub type PackshotResult<T> = std::result::Result<T, PackshotError>;
