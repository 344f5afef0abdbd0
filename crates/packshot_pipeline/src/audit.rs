//! Forensic audit: turn the primary asset into an identity contract.

use packshot_core::{
    AuditReport, GenerateRequest, Input, Message, Modality, Role, SourceAsset,
};
use packshot_interface::InferenceDriver;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const AUDIT_INSTRUCTION: &str = "You are a forensic product analyst. Study the attached product image and \
write a short identity record that another artist must reproduce exactly. Cover: \
(1) every visible text, logo, label and marking, transcribed character for character; \
(2) silhouette, proportions and geometry; \
(3) materials, surface finish and colours. \
State facts only, no styling advice, no more than 120 words.";

/// Issues the single audit call for a job.
#[derive(Debug)]
pub struct ForensicAuditor<D> {
    driver: Arc<D>,
    model: String,
}

impl<D: InferenceDriver> ForensicAuditor<D> {
    /// Creates an auditor calling `model` through `driver`.
    pub fn new(driver: Arc<D>, model: impl Into<String>) -> Self {
        Self {
            driver,
            model: model.into(),
        }
    }

    /// Describes the identity-critical facts of `asset`.
    ///
    /// Never fails: any inference error or empty answer yields
    /// [`AuditReport::fallback`].
    #[instrument(skip_all, fields(model = %self.model, media_type = asset.media_type()))]
    pub async fn audit(&self, asset: &SourceAsset) -> AuditReport {
        let request = match self.request(asset) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Could not assemble audit request, using fallback report");
                return AuditReport::fallback();
            }
        };

        match self.driver.generate(&request).await {
            Ok(response) => {
                let text = response.text();
                let text = text.trim();
                if text.is_empty() {
                    warn!("Audit returned no text, using fallback report");
                    AuditReport::fallback()
                } else {
                    debug!(len = text.len(), "Audit complete");
                    AuditReport::new(text)
                }
            }
            Err(e) => {
                warn!(error = %e, "Audit failed, using fallback report");
                AuditReport::fallback()
            }
        }
    }

    fn request(&self, asset: &SourceAsset) -> Result<GenerateRequest, String> {
        GenerateRequest::builder()
            .messages(vec![
                Message::new(Role::System, vec![Input::Text(AUDIT_INSTRUCTION.to_string())]),
                Message::new(
                    Role::User,
                    vec![
                        Input::Text("Audit this product.".to_string()),
                        asset.to_input(),
                    ],
                ),
            ])
            .model(Some(self.model.clone()))
            .temperature(Some(0.2))
            .response_modalities(vec![Modality::Text])
            .build()
            .map_err(|e| e.to_string())
    }
}
