//! Pipeline error types.

/// Specific error conditions raised by the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PipelineErrorKind {
    /// Requested pack size is not one of the supported sizes
    UnsupportedPackSize(u32),
    /// The request has no primary asset
    MissingPrimaryAsset,
    /// An asset failed validation (empty bytes, non-image media type)
    InvalidAsset(String),
    /// Render response contained no image payload
    NoImageProduced {
        /// Position of the render task
        index: usize,
    },
    /// Failed to assemble a request from its parts
    Builder(String),
}

impl std::fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineErrorKind::UnsupportedPackSize(size) => {
                write!(f, "Unsupported pack size: {}", size)
            }
            PipelineErrorKind::MissingPrimaryAsset => {
                write!(f, "Generation request requires a primary asset")
            }
            PipelineErrorKind::InvalidAsset(msg) => write!(f, "Invalid asset: {}", msg),
            PipelineErrorKind::NoImageProduced { index } => {
                write!(f, "Render task {} produced no image", index)
            }
            PipelineErrorKind::Builder(msg) => write!(f, "Failed to build request: {}", msg),
        }
    }
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use packshot_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::UnsupportedPackSize(7));
/// assert!(format!("{}", err).contains("7"));
/// ```
#[derive(Debug, Clone)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pipeline Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for PipelineError {}
