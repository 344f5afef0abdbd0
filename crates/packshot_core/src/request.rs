//! Request and response types for inference calls.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Structured-output hint passed through to providers that support it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResponseFormat {
    /// MIME type the response must use, e.g. `application/json`
    mime_type: String,
    /// JSON schema the response must satisfy
    schema: Option<serde_json::Value>,
}

impl ResponseFormat {
    /// JSON output constrained by the given schema.
    pub fn json_schema(schema: serde_json::Value) -> Self {
        Self {
            mime_type: "application/json".to_string(),
            schema: Some(schema),
        }
    }
}

/// Kind of content a provider is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Text parts
    Text,
    /// Inline image parts
    Image,
}

/// Generic generation request (multimodal-safe).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// Conversation messages, system instruction first when present
    messages: Vec<Message>,
    /// Maximum tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Model override; the driver's default model is used when unset
    model: Option<String>,
    /// Structured output constraint
    response_format: Option<ResponseFormat>,
    /// Modalities the response may contain; empty means provider default
    response_modalities: Vec<Modality>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct GenerateResponse {
    /// Outputs in the order the provider returned them
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Creates a response from outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// All text outputs joined by newlines.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The first image payload, if any.
    pub fn first_image(&self) -> Option<(Option<&str>, &[u8])> {
        self.outputs.iter().find_map(|output| match output {
            Output::Image { mime, data } => Some((mime.as_deref(), data.as_slice())),
            _ => None,
        })
    }
}
