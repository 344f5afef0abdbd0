//! Output types from inference responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Generated image output.
    Image {
        /// MIME type of the image
        mime: Option<String>,
        /// Binary image data
        data: Vec<u8>,
    },

    /// Structured JSON output.
    Json(serde_json::Value),
}
