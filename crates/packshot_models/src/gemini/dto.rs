//! Wire types for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// One part of a content block: either text or inline data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline data part.
    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

/// A role-tagged list of parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`; omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Sampling and output options.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type for structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Response schema for structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// `TEXT` / `IMAGE`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<String>,
}

impl GenerationConfig {
    /// True when no option is set, so the block can be omitted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, derive_builder::Builder, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerateContentRequest {
    /// Conversation turns
    contents: Vec<Content>,
    /// System instruction
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    /// Generation options
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a new builder for GenerateContentRequest.
    pub fn builder() -> GenerateContentRequestBuilder {
        GenerateContentRequestBuilder::default()
    }
}

/// One response candidate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself, present when it was blocked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason, e.g. `SAFETY`
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Prompt feedback
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}
