//! Gemini backend implementation.
//!
//! Talks to the Google Generative Language `generateContent` endpoint.
//! Any non-success outcome maps to a `BackendError` variant so the
//! Response Generator can fall back to templated replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sparkle_core::backend::{BackendRequest, BackendResponse, GenerativeBackend};
use sparkle_core::error::BackendError;
use sparkle_core::session::Role;
use tracing::{debug, warn};

/// A Gemini `generateContent` client.
pub struct GeminiBackend {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a new backend client against a base URL
    /// (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Convert a tutoring request into the Gemini wire shape.
    fn to_api_request(request: &BackendRequest) -> ApiRequest {
        let mut contents: Vec<ApiContent> = request
            .history
            .iter()
            .map(|turn| ApiContent {
                role: match turn.role {
                    Role::Learner => "user".into(),
                    Role::Tutor => "model".into(),
                },
                parts: vec![ApiPart {
                    text: turn.content.clone(),
                }],
            })
            .collect();

        contents.push(ApiContent {
            role: "user".into(),
            parts: vec![ApiPart {
                text: request.utterance.clone(),
            }],
        });

        ApiRequest {
            system_instruction: ApiSystemInstruction {
                parts: vec![ApiPart {
                    text: request.system.clone(),
                }],
            },
            contents,
            generation_config: ApiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        request: BackendRequest,
    ) -> std::result::Result<BackendResponse, BackendError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = Self::to_api_request(&request);

        debug!(model = %request.model, turns = request.history.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(BackendError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(BackendError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Backend returned error");
            return Err(BackendError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| BackendError::MalformedOutput(
                format!("Failed to parse response: {e}"),
            ))?;

        let text = api_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(BackendError::MalformedOutput(
                "No candidate text in response".into(),
            ));
        }

        Ok(BackendResponse {
            text,
            model: api_response
                .model_version
                .unwrap_or_else(|| request.model.clone()),
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, BackendError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- Gemini API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: ApiSystemInstruction,
    contents: Vec<ApiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: ApiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct ApiSystemInstruction {
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiContent {
    role: String,
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct ApiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(rename = "modelVersion", default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidate {
    content: ApiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct ApiCandidateContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::session::Turn;

    fn test_request() -> BackendRequest {
        BackendRequest {
            model: "gemini-1.5-flash".into(),
            system: "You are a coding tutor".into(),
            history: vec![Turn::learner("hi"), Turn::tutor("hello!")],
            utterance: "how do loops work?".into(),
            temperature: 0.7,
            max_tokens: Some(512),
        }
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let backend = GeminiBackend::new("https://example.com/v1beta/", "key");
        assert_eq!(backend.base_url, "https://example.com/v1beta");
        assert_eq!(backend.name(), "gemini");
    }

    #[test]
    fn history_maps_to_user_and_model_roles() {
        let api = GeminiBackend::to_api_request(&test_request());
        assert_eq!(api.contents.len(), 3);
        assert_eq!(api.contents[0].role, "user");
        assert_eq!(api.contents[1].role, "model");
        // Current utterance is appended last as a user turn.
        assert_eq!(api.contents[2].role, "user");
        assert_eq!(api.contents[2].parts[0].text, "how do loops work?");
    }

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let api = GeminiBackend::to_api_request(&test_request());
        let json = serde_json::to_string(&api).unwrap();
        assert!(json.contains("systemInstruction"));
        assert!(json.contains("generationConfig"));
        assert!(json.contains("maxOutputTokens"));
    }

    #[test]
    fn parse_candidate_response() {
        let data = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Loops repeat steps!"}], "role": "model"}}
            ],
            "modelVersion": "gemini-1.5-flash-002"
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(
            parsed.candidates[0].content.parts[0].text,
            "Loops repeat steps!"
        );
        assert_eq!(parsed.model_version.as_deref(), Some("gemini-1.5-flash-002"));
    }

    #[test]
    fn parse_empty_response() {
        let parsed: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
        assert!(parsed.model_version.is_none());
    }

    #[test]
    fn parse_multi_part_candidate() {
        let data = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]}}
            ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        let joined: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.clone())
            .collect();
        assert_eq!(joined, "Part one. Part two.");
    }
}
