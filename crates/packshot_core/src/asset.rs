//! Source assets supplied with a generation job.

use crate::Input;
use packshot_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};

/// The part a source asset plays in a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetRole {
    /// The subject every render must reproduce
    Primary,
    /// Extra views of the same subject
    Secondary,
    /// A human model to feature in model-centric shots
    ModelReference,
}

/// Image bytes with their declared media type and role.
///
/// Immutable once accepted into a job: there are no setters.
///
/// # Examples
///
/// ```
/// use packshot_core::{AssetRole, SourceAsset};
///
/// let asset = SourceAsset::new(vec![1, 2, 3], "image/png", AssetRole::Primary);
/// assert_eq!(asset.media_type(), "image/png");
/// assert_eq!(asset.len(), 3);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SourceAsset {
    #[getter(skip)]
    bytes: Vec<u8>,
    #[getter(skip)]
    media_type: String,
    role: AssetRole,
}

impl SourceAsset {
    /// Creates an asset from raw bytes.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>, role: AssetRole) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
            role,
        }
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared media type, e.g. `image/jpeg`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Same role, new payload. Used when normalization re-encodes an image.
    pub fn with_payload(&self, bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self::new(bytes, media_type, self.role)
    }

    /// Converts the asset into an inference image input.
    pub fn to_input(&self) -> Input {
        Input::image_bytes(self.media_type.clone(), self.bytes.clone())
    }

    /// Checks the asset is a non-empty image with the expected role.
    #[track_caller]
    pub fn validate(&self, expected: AssetRole) -> Result<(), PipelineError> {
        if self.role != expected {
            return Err(PipelineError::new(PipelineErrorKind::InvalidAsset(format!(
                "expected {} asset, got {}",
                expected, self.role
            ))));
        }
        if self.bytes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::InvalidAsset(format!(
                "{} asset is empty",
                self.role
            ))));
        }
        if !self.media_type.starts_with("image/") {
            return Err(PipelineError::new(PipelineErrorKind::InvalidAsset(format!(
                "{} asset has non-image media type '{}'",
                self.role, self.media_type
            ))));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SourceAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceAsset")
            .field("role", &self.role)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
