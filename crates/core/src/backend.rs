//! GenerativeBackend trait — the abstraction over generative-text services.
//!
//! A backend knows how to send a tutoring context to a remote model and get
//! a text reply back. The Response Generator calls `complete()` without
//! knowing which backend is configured, and treats any error as a signal to
//! fall back to templated replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::session::Turn;

/// A request to the generative backend: system instruction plus a bounded
/// conversation window ending in the learner's current utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRequest {
    /// The model to use (e.g. "gemini-1.5-flash").
    pub model: String,

    /// System-level instruction derived from tier and current lesson.
    pub system: String,

    /// The most recent turns, oldest first. Bounded by the caller.
    pub history: Vec<Turn>,

    /// The learner utterance awaiting a reply.
    pub utterance: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResponse {
    /// The generated reply text.
    pub text: String,

    /// Which model actually responded (may differ from requested).
    pub model: String,
}

/// The core backend trait.
///
/// Every generative service (Gemini, OpenAI-compatible proxies, test mocks)
/// implements this trait. The Response Generator calls `complete()` under a
/// timeout and recovers from every error variant.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// A human-readable name for this backend (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send a request and get a complete reply.
    async fn complete(
        &self,
        request: BackendRequest,
    ) -> std::result::Result<BackendResponse, BackendError>;

    /// Health check — can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, BackendError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_request_defaults() {
        let req = BackendRequest {
            model: "gemini-1.5-flash".into(),
            system: "You are a coding tutor".into(),
            history: vec![],
            utterance: "hello".into(),
            temperature: default_temperature(),
            max_tokens: None,
        };
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.history.is_empty());
    }

    #[test]
    fn backend_request_serialization() {
        let req = BackendRequest {
            model: "gemini-1.5-flash".into(),
            system: "sys".into(),
            history: vec![Turn::learner("hi"), Turn::tutor("hello")],
            utterance: "how do loops work?".into(),
            temperature: 0.7,
            max_tokens: Some(512),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("how do loops work?"));
        assert!(json.contains("max_tokens"));
    }
}
