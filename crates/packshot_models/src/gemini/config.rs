//! Connection settings for the Gemini REST API.

use derive_getters::Getters;
use packshot_error::{InferenceError, InferenceErrorKind};

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model, able to return inline images.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings, resolved once at startup.
#[derive(Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    api_key: String,
    /// Default model when a request does not name one
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Base URL without trailing slash
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Per-request timeout in seconds
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    timeout_secs: u64,
}

impl GeminiConfig {
    /// Returns a builder for constructing a GeminiConfig.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `GEMINI_API_KEY` (required)
    /// - `GEMINI_MODEL` (default: [`DEFAULT_MODEL`])
    /// - `GEMINI_BASE_URL` (default: [`DEFAULT_BASE_URL`])
    /// - `GEMINI_TIMEOUT_SECS` (default: [`DEFAULT_TIMEOUT_SECS`])
    pub fn from_env() -> Result<Self, InferenceError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| InferenceError::new(InferenceErrorKind::MissingApiKey))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    /// Endpoint URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
