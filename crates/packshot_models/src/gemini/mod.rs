//! Gemini REST integration.
//!
//! Speaks the `generateContent` endpoint directly over reqwest so inline image
//! parts in both directions are under our control.

mod client;
mod config;
mod conversions;
mod dto;

pub use client::GeminiClient;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiConfig, GeminiConfigBuilder,
};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, PromptFeedback,
};
