//! Gemini REST client.

use crate::gemini::{GeminiConfig, GenerateContentResponse, conversions};
use async_trait::async_trait;
use packshot_core::{GenerateRequest, GenerateResponse};
use packshot_error::{InferenceError, InferenceErrorKind, PackshotResult};
use packshot_interface::InferenceDriver;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Driver for the Gemini `generateContent` endpoint.
///
/// Holds one pooled HTTP client; build it once and share it.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: GeminiConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| InferenceError::new(InferenceErrorKind::ClientCreation(e.to_string())))?;

        debug!(url = %config.base_url(), "Created Gemini client");

        Ok(Self { client, config })
    }

    /// Creates a client from `GEMINI_*` environment variables.
    pub fn from_env() -> Result<Self, InferenceError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Connection settings in use.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn call(&self, req: &GenerateRequest) -> Result<GenerateResponse, InferenceError> {
        let model = req.model().as_deref().unwrap_or(self.config.model());
        let body = conversions::to_gemini_request(req)?;

        debug!(
            model,
            turns = body.contents().len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.config.endpoint(model))
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                InferenceError::new(InferenceErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "API error");
            return Err(InferenceError::new(InferenceErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            InferenceError::new(InferenceErrorKind::MalformedResponse(e.to_string()))
        })?;

        debug!(candidates = parsed.candidates.len(), "Received response");

        conversions::from_gemini_response(&parsed)
    }
}

#[async_trait]
impl InferenceDriver for GeminiClient {
    #[instrument(skip(self, req), fields(provider = "gemini"))]
    async fn generate(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse> {
        Ok(self.call(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
