//! Gemini REST Client
//!
//! Thin wrapper over the `generateContent` endpoint. Wire types cover the
//! subset of the API this application uses: text contents, a system
//! instruction, JSON output mode, the Google Search grounding tool and the
//! thinking budget. Grounding citations are lifted out of the first
//! candidate's metadata.

use serde::{Deserialize, Serialize};
use tracing::debug;

use wing_analyst_core::{AiError, ChatRole, GroundingSource};

use crate::http_client::build_http_client;
use crate::types::{missing_api_key_error, GeminiConfig, ModelRequest};

/// Text plus citations returned by one generation call.
#[derive(Debug, Clone)]
pub struct GeminiReply {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: build_http_client(),
        }
    }

    /// Issue one generation call against the given model.
    pub async fn generate(&self, model: &str, request: &ModelRequest) -> Result<GeminiReply, AiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(missing_api_key_error)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );
        let body = WireRequest::from(request);
        debug!(model, turns = request.turns.len(), "issuing generateContent call");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| AiError::from_message(&err.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| AiError::Transport {
                message: err.to_string(),
            })?;
        if !status.is_success() {
            return Err(AiError::from_status(
                status.as_u16(),
                &error_message(&body_text),
            ));
        }

        let wire: WireResponse =
            serde_json::from_str(&body_text).map_err(|err| AiError::MalformedResponse {
                message: format!("undecodable generateContent response: {err}"),
            })?;
        Ok(wire.into_reply())
    }
}

/// Pull the human-readable message out of an API error body, falling back
/// to the raw text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
        #[serde(default)]
        status: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if parsed.error.status.is_empty() => parsed.error.message,
        Ok(parsed) => format!("{} ({})", parsed.error.message, parsed.error.status),
        Err(_) => body.to_string(),
    }
}

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<WireThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

impl From<&ModelRequest> for WireRequest {
    fn from(request: &ModelRequest) -> Self {
        let contents = request
            .turns
            .iter()
            .map(|turn| WireContent {
                role: Some(
                    match turn.role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![WirePart {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        let system_instruction = request.system.as_ref().map(|system| WireContent {
            role: None,
            parts: vec![WirePart {
                text: system.clone(),
            }],
        });

        let generation_config = if request.json_output || request.thinking_budget.is_some() {
            Some(WireGenerationConfig {
                response_mime_type: request
                    .json_output
                    .then(|| "application/json".to_string()),
                thinking_config: request
                    .thinking_budget
                    .map(|budget| WireThinkingConfig {
                        thinking_budget: budget,
                    }),
            })
        } else {
            None
        };

        let tools = request.web_grounding.then(|| {
            vec![WireTool {
                google_search: serde_json::Map::new(),
            }]
        });

        Self {
            contents,
            system_instruction,
            generation_config,
            tools,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
    #[serde(default)]
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    #[serde(default)]
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

impl WireResponse {
    fn into_reply(self) -> GeminiReply {
        let mut text = String::new();
        let mut sources = Vec::new();
        if let Some(candidate) = self.candidates.into_iter().next() {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    text.push_str(&part.text);
                }
            }
            if let Some(metadata) = candidate.grounding_metadata {
                sources = metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| GroundingSource {
                        uri: web.uri,
                        title: web.title,
                    })
                    .collect();
            }
        }
        GeminiReply { text, sources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wing_analyst_core::ChatMessage;

    #[test]
    fn test_wire_request_shape() {
        let request = ModelRequest::prompt("Analyse ce profil")
            .with_json_output()
            .with_web_grounding()
            .with_thinking_budget(8000);
        let wire = WireRequest::from(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyse ce profil");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            8000
        );
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_wire_request_history_roles() {
        let request = ModelRequest {
            turns: vec![
                ChatMessage {
                    role: ChatRole::User,
                    text: "Question".to_string(),
                },
                ChatMessage {
                    role: ChatRole::Model,
                    text: "Réponse".to_string(),
                },
            ],
            system: Some("Tu es l'expert.".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Tu es l'expert."
        );
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_response_text_and_sources() {
        let raw = r###"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "## Rapport"}, {"text": " complet"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://flyozone.com", "title": "Ozone"}},
                        {"other": {}}
                    ]
                }
            }]
        }"###;
        let wire: WireResponse = serde_json::from_str(raw).unwrap();
        let reply = wire.into_reply();
        assert_eq!(reply.text, "## Rapport complet");
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(reply.sources[0].title, "Ozone");
    }

    #[test]
    fn test_empty_response() {
        let wire: WireResponse = serde_json::from_str(r#"{}"#).unwrap();
        let reply = wire.into_reply();
        assert!(reply.text.is_empty());
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "Quota exceeded (RESOURCE_EXHAUSTED)");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
