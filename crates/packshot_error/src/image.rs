//! Image processing error types.

/// Error kinds for image decode/encode operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageErrorKind {
    /// Bytes could not be decoded as an image.
    #[display("Decode failed: {_0}")]
    Decode(String),
    /// Resized image could not be re-encoded.
    #[display("Encode failed: {_0}")]
    Encode(String),
    /// Blocking worker panicked or was cancelled.
    #[display("Worker failed: {_0}")]
    Worker(String),
}

/// Image error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    kind: ImageErrorKind,
    line: u32,
    file: &'static str,
}

impl ImageError {
    /// Create a new image error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ImageErrorKind {
        &self.kind
    }
}
