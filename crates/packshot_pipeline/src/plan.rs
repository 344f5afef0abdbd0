//! Strategy planning: propose one distinct shot per requested image.

use packshot_core::{
    AuditReport, GenerateRequest, GenerationMode, GenerationRequest, Input, Message, Output,
    ResponseFormat, Role,
};
use packshot_error::JsonError;
use packshot_interface::InferenceDriver;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Issues the single planning call for a job.
#[derive(Debug)]
pub struct StrategyPlanner<D> {
    driver: Arc<D>,
    model: String,
}

impl<D: InferenceDriver> StrategyPlanner<D> {
    /// Creates a planner calling `model` through `driver`.
    pub fn new(driver: Arc<D>, model: impl Into<String>) -> Self {
        Self {
            driver,
            model: model.into(),
        }
    }

    /// Proposes exactly `pack_size` shot descriptions.
    ///
    /// Returns an empty list on inference failure, unparseable output, or a
    /// list shorter than the pack size. Padding is the caller's job.
    #[instrument(skip_all, fields(model = %self.model, pack_size = %request.pack_size()))]
    pub async fn plan(&self, audit: &AuditReport, request: &GenerationRequest) -> Vec<String> {
        let expected = request.pack_size().count();

        let generate_request = match self.request(audit, request) {
            Ok(generate_request) => generate_request,
            Err(e) => {
                warn!(error = %e, "Could not assemble planning request");
                return Vec::new();
            }
        };

        let response = match self.driver.generate(&generate_request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Planning failed");
                return Vec::new();
            }
        };

        match decode_shot_list(response.outputs()) {
            Ok(shots) => match fit_shot_list(shots, expected) {
                Some(shots) => {
                    debug!(shots = shots.len(), "Planning complete");
                    shots
                }
                None => {
                    warn!(expected, "Planner returned too few shots");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Planner output unusable");
                Vec::new()
            }
        }
    }

    fn request(
        &self,
        audit: &AuditReport,
        request: &GenerationRequest,
    ) -> Result<GenerateRequest, String> {
        let count = request.pack_size().count();
        let subject = match request.mode() {
            GenerationMode::ObjectCentric => {
                "product-only shots (studio, flat-lay, in-context lifestyle staging)"
            }
            GenerationMode::ModelCentric => {
                "shots of a human model wearing, holding or using the product"
            }
        };

        let prompt = format!(
            "Plan a marketing photo set of exactly {count} distinct {subject}.\n\
             Category: {category}\n\
             Style: {style}\n\
             Product identity (do not contradict): {audit}\n\n\
             Vary camera angle, framing, setting and lighting so no two shots repeat. \
             Return a JSON array of {count} strings, one concise shot description each.",
            count = count,
            subject = subject,
            category = request.category(),
            style = request.style(),
            audit = audit,
        );

        let schema = serde_json::json!({
            "type": "ARRAY",
            "items": { "type": "STRING" },
            "minItems": count,
            "maxItems": count,
        });

        GenerateRequest::builder()
            .messages(vec![Message::new(Role::User, vec![Input::Text(prompt)])])
            .model(Some(self.model.clone()))
            .temperature(Some(0.9))
            .response_format(Some(ResponseFormat::json_schema(schema)))
            .build()
            .map_err(|e| e.to_string())
    }
}

/// Extracts a list of at least `expected` non-empty shot descriptions.
///
/// Accepts a JSON output part, or a text part holding a JSON array, optionally
/// wrapped in a Markdown code fence. Extra entries are truncated.
pub fn parse_shot_list(outputs: &[Output], expected: usize) -> Option<Vec<String>> {
    fit_shot_list(decode_shot_list(outputs).ok()?, expected)
}

/// Decodes the first JSON or text output as an array of strings.
fn decode_shot_list(outputs: &[Output]) -> Result<Vec<String>, JsonError> {
    let mut last_error = JsonError::new("response contained no text or JSON output");
    for output in outputs {
        let decoded = match output {
            Output::Json(value) => serde_json::from_value(value.clone()),
            Output::Text(text) => serde_json::from_str(strip_code_fence(text)),
            Output::Image { .. } => continue,
        };
        match decoded {
            Ok(shots) => return Ok(shots),
            Err(e) => last_error = JsonError::new(format!("shot list: {}", e)),
        }
    }
    Err(last_error)
}

fn fit_shot_list(shots: Vec<String>, expected: usize) -> Option<Vec<String>> {
    let mut shots: Vec<String> = shots
        .into_iter()
        .map(|shot| shot.trim().to_string())
        .filter(|shot| !shot.is_empty())
        .collect();

    if shots.len() < expected {
        return None;
    }
    shots.truncate(expected);
    Some(shots)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Vec<Output> {
        vec![Output::Text(s.to_string())]
    }

    #[test]
    fn test_decode_reports_malformed_text() {
        let err = decode_shot_list(&text("not json")).expect_err("should fail");
        assert!(err.message.starts_with("shot list:"));
    }

    #[test]
    fn test_parses_plain_array() {
        let shots = parse_shot_list(&text(r#"["a", "b", "c"]"#), 3).expect("shots");
        assert_eq!(shots, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parses_fenced_array_and_truncates() {
        let shots =
            parse_shot_list(&text("```json\n[\"a\", \"b\", \"c\"]\n```"), 2).expect("shots");
        assert_eq!(shots, vec!["a", "b"]);
    }

    #[test]
    fn test_short_list_is_rejected() {
        assert!(parse_shot_list(&text(r#"["a", " "]"#), 2).is_none());
    }

    #[test]
    fn test_non_array_is_rejected() {
        assert!(parse_shot_list(&text("here are your shots: a, b"), 2).is_none());
        assert!(parse_shot_list(&[Output::Json(serde_json::json!({"shots": []}))], 1).is_none());
    }
}
