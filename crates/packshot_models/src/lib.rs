//! Inference provider integrations for packshot.

mod gemini;

pub use gemini::{
    Candidate, Content, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiClient,
    GeminiConfig, GeminiConfigBuilder, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part, PromptFeedback,
};
