//! Input types for inference requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types to the inference service.
///
/// # Examples
///
/// ```
/// use packshot_core::{Input, MediaSource};
///
/// let text = Input::Text("Describe this product".to_string());
///
/// let image = Input::Image {
///     mime: Some("image/jpeg".to_string()),
///     source: MediaSource::Binary(vec![0xFF, 0xD8, 0xFF]),
/// };
/// # let _ = (text, image);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (base64 or raw bytes)
        source: MediaSource,
    },
}

impl Input {
    /// Wraps raw image bytes as an image input.
    pub fn image_bytes(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Input::Image {
            mime: Some(mime.into()),
            source: MediaSource::Binary(data),
        }
    }
}
