//! Type conversions between packshot and Gemini wire formats.

use crate::gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use packshot_core::{GenerateRequest, GenerateResponse, Input, MediaSource, Modality, Output, Role};
use packshot_error::{InferenceError, InferenceErrorKind};

/// Converts a packshot request into a `generateContent` body.
///
/// System messages are merged into the system instruction; assistant turns
/// become `model` turns.
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GenerateContentRequest, InferenceError> {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();

    for msg in req.messages() {
        let parts = msg
            .content()
            .iter()
            .map(to_part)
            .collect::<Result<Vec<_>, _>>()?;

        match msg.role() {
            Role::System => system_parts.extend(parts),
            Role::User => contents.push(Content {
                role: Some("user".to_string()),
                parts,
            }),
            Role::Assistant => contents.push(Content {
                role: Some("model".to_string()),
                parts,
            }),
        }
    }

    let mut config = GenerationConfig {
        temperature: *req.temperature(),
        max_output_tokens: *req.max_tokens(),
        ..GenerationConfig::default()
    };
    if let Some(format) = req.response_format() {
        config.response_mime_type = Some(format.mime_type().clone());
        config.response_schema = format.schema().clone();
    }
    config.response_modalities = req
        .response_modalities()
        .iter()
        .map(|modality| match modality {
            Modality::Text => "TEXT".to_string(),
            Modality::Image => "IMAGE".to_string(),
        })
        .collect();

    let system_instruction = (!system_parts.is_empty()).then(|| Content {
        role: None,
        parts: system_parts,
    });
    let generation_config = (!config.is_empty()).then_some(config);

    GenerateContentRequest::builder()
        .contents(contents)
        .system_instruction(system_instruction)
        .generation_config(generation_config)
        .build()
        .map_err(|e| {
            InferenceError::new(InferenceErrorKind::UnsupportedInput(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

fn to_part(input: &Input) -> Result<Part, InferenceError> {
    match input {
        Input::Text(text) => Ok(Part::text(text.clone())),
        Input::Image { mime, source } => {
            let mime = mime.clone().unwrap_or_else(|| "image/png".to_string());
            let data = match source {
                MediaSource::Base64(encoded) => encoded.clone(),
                MediaSource::Binary(bytes) => STANDARD.encode(bytes),
            };
            Ok(Part::inline(mime, data))
        }
    }
}

/// Converts a `generateContent` response into packshot outputs.
///
/// Only the first candidate is used. A response with no candidates is a
/// block if the prompt feedback says so, and malformed otherwise.
pub fn from_gemini_response(
    response: &GenerateContentResponse,
) -> Result<GenerateResponse, InferenceError> {
    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone());
        return Err(match reason {
            Some(reason) => InferenceError::new(InferenceErrorKind::Blocked(reason)),
            None => InferenceError::new(InferenceErrorKind::MalformedResponse(
                "No candidates in response".to_string(),
            )),
        });
    };

    let mut outputs = Vec::new();
    for part in candidate.content.iter().flat_map(|content| content.parts.iter()) {
        if let Some(text) = &part.text {
            outputs.push(Output::Text(text.clone()));
        }
        if let Some(inline) = &part.inline_data {
            let data = STANDARD
                .decode(inline.data.as_bytes())
                .map_err(|e| InferenceError::new(InferenceErrorKind::Base64Decode(e.to_string())))?;
            outputs.push(Output::Image {
                mime: Some(inline.mime_type.clone()),
                data,
            });
        }
    }

    if outputs.is_empty() {
        if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
            return Err(InferenceError::new(InferenceErrorKind::Blocked(
                reason.to_string(),
            )));
        }
    }

    Ok(GenerateResponse::new(outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::{Candidate, InlineData, PromptFeedback};
    use packshot_core::{Message, ResponseFormat};

    #[test]
    fn test_system_messages_become_system_instruction() {
        let req = GenerateRequest::builder()
            .messages(vec![
                Message::new(Role::System, vec![Input::Text("be precise".to_string())]),
                Message::new(
                    Role::User,
                    vec![
                        Input::Text("describe".to_string()),
                        Input::image_bytes("image/jpeg", vec![1, 2, 3]),
                    ],
                ),
            ])
            .response_modalities(vec![Modality::Text, Modality::Image])
            .build()
            .expect("request");

        let body = to_gemini_request(&req).expect("conversion");

        let system = body.system_instruction().as_ref().expect("system instruction");
        assert_eq!(system.parts[0].text.as_deref(), Some("be precise"));
        assert_eq!(body.contents().len(), 1);
        assert_eq!(body.contents()[0].role.as_deref(), Some("user"));

        let inline = body.contents()[0].parts[1].inline_data.as_ref().expect("inline");
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, STANDARD.encode([1u8, 2, 3]));

        let config = body.generation_config().as_ref().expect("config");
        assert_eq!(config.response_modalities, vec!["TEXT", "IMAGE"]);
    }

    #[test]
    fn test_serialized_body_uses_camel_case() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::new(
                Role::User,
                vec![Input::Text("plan".to_string())],
            )])
            .response_format(ResponseFormat::json_schema(serde_json::json!({"type": "ARRAY"})))
            .build()
            .expect("request");

        let body = serde_json::to_value(to_gemini_request(&req).expect("conversion"))
            .expect("serialize");

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_image_parts_are_decoded() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![
                        Part::text("here you go"),
                        Part {
                            text: None,
                            inline_data: Some(InlineData {
                                mime_type: "image/png".to_string(),
                                data: STANDARD.encode([9u8, 8, 7]),
                            }),
                        },
                    ],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        };

        let converted = from_gemini_response(&response).expect("conversion");

        assert_eq!(converted.text(), "here you go");
        let (mime, data) = converted.first_image().expect("image");
        assert_eq!(mime, Some("image/png"));
        assert_eq!(data, &[9, 8, 7]);
    }

    #[test]
    fn test_blocked_prompt_is_reported() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
            }),
        };

        let err = from_gemini_response(&response).expect_err("blocked");
        assert_eq!(err.kind, InferenceErrorKind::Blocked("SAFETY".to_string()));
    }
}
