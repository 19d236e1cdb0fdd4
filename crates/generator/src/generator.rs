//! The response generator: generative backend first, rules on failure.

use std::sync::Arc;
use std::time::Duration;

use sparkle_core::backend::{BackendRequest, GenerativeBackend};
use sparkle_core::lesson::Lesson;
use sparkle_core::session::Turn;
use sparkle_core::tier::Tier;
use tracing::{debug, warn};

use crate::prompt::build_system_prompt;
use crate::rules::RuleResponder;

/// How many prior turns of conversation the backend sees.
pub const HISTORY_WINDOW: usize = 5;

/// Everything the generator needs to know about the session, snapshotted
/// by the caller. The generator never touches session state itself.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub tier: Tier,
    pub lesson: Lesson,
    pub learner_name: String,
    pub age: i32,
    pub recent: Vec<Turn>,
}

/// Produces tutor replies. Infallible by construction: if the generative
/// backend errors, times out, or was never configured, the rule-based
/// responder answers instead.
pub struct ResponseGenerator {
    backend: Option<Arc<dyn GenerativeBackend>>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
    rules: RuleResponder,
}

impl ResponseGenerator {
    /// Create a generator backed by a generative model.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend: Some(backend),
            model: model.into(),
            temperature,
            max_tokens,
            timeout,
            rules: RuleResponder::new(),
        }
    }

    /// Create a generator with no backend at all. Every reply comes from
    /// the rule-based responder.
    pub fn offline() -> Self {
        Self {
            backend: None,
            model: String::new(),
            temperature: 0.0,
            max_tokens: None,
            timeout: Duration::from_secs(0),
            rules: RuleResponder::new(),
        }
    }

    /// Generate a tutor reply for an utterance.
    pub async fn generate(&self, utterance: &str, ctx: &SessionContext) -> String {
        let Some(backend) = &self.backend else {
            debug!("No generative backend configured, using rule-based reply");
            return self.rules.respond(utterance, ctx.tier);
        };

        let recent = if ctx.recent.len() > HISTORY_WINDOW {
            ctx.recent[ctx.recent.len() - HISTORY_WINDOW..].to_vec()
        } else {
            ctx.recent.clone()
        };

        let request = BackendRequest {
            model: self.model.clone(),
            system: build_system_prompt(ctx),
            history: recent,
            utterance: utterance.to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match tokio::time::timeout(self.timeout, backend.complete(request)).await {
            Ok(Ok(response)) if !response.text.trim().is_empty() => {
                debug!(backend = backend.name(), model = %response.model, "Backend reply");
                response.text
            }
            Ok(Ok(_)) => {
                warn!(backend = backend.name(), "Backend returned empty text, falling back");
                self.rules.respond(utterance, ctx.tier)
            }
            Ok(Err(e)) => {
                warn!(backend = backend.name(), error = %e, "Backend failed, falling back");
                self.rules.respond(utterance, ctx.tier)
            }
            Err(_) => {
                warn!(
                    backend = backend.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Backend timed out, falling back"
                );
                self.rules.respond(utterance, ctx.tier)
            }
        }
    }

    /// The welcome message for a new session. Always templated, never
    /// generative: session start must be instant and predictable.
    pub fn welcome(&self, ctx: &SessionContext) -> String {
        self.rules
            .welcome(ctx.tier, &ctx.learner_name, &ctx.lesson.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sparkle_core::backend::BackendResponse;
    use sparkle_core::error::BackendError;
    use std::sync::Mutex;

    struct MockBackend {
        reply: Option<String>,
        calls: Mutex<Vec<BackendRequest>>,
    }

    impl MockBackend {
        fn succeeding(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for MockBackend {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: BackendRequest,
        ) -> std::result::Result<BackendResponse, BackendError> {
            self.calls.lock().unwrap().push(request);
            match &self.reply {
                Some(text) => Ok(BackendResponse {
                    text: text.clone(),
                    model: "mock-1".into(),
                }),
                None => Err(BackendError::Network("connection refused".into())),
            }
        }
    }

    struct HangingBackend;

    #[async_trait]
    impl GenerativeBackend for HangingBackend {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn complete(
            &self,
            _request: BackendRequest,
        ) -> std::result::Result<BackendResponse, BackendError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    fn ctx_with_turns(turns: Vec<Turn>) -> SessionContext {
        SessionContext {
            tier: Tier::EarlyLearner,
            lesson: Lesson {
                id: "mw_001".into(),
                title: "Making the Wizard Move".into(),
                concepts: vec!["sequence".into()],
                story: "Help the wizard find the crystal".into(),
                activities: vec![],
                prerequisite: None,
                mastery: "Child can move the wizard".into(),
            },
            learner_name: "Emma".into(),
            age: 6,
            recent: turns,
        }
    }

    #[tokio::test]
    async fn backend_reply_is_used_when_it_succeeds() {
        let backend = Arc::new(MockBackend::succeeding("Loops repeat steps!"));
        let generator = ResponseGenerator::new(
            backend.clone(),
            "mock-1",
            0.7,
            Some(512),
            Duration::from_secs(5),
        );

        let reply = generator.generate("how do loops work?", &ctx_with_turns(vec![])).await;
        assert_eq!(reply, "Loops repeat steps!");
        assert_eq!(backend.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn backend_failure_falls_back_to_rules() {
        let backend = Arc::new(MockBackend::failing());
        let generator =
            ResponseGenerator::new(backend, "mock-1", 0.7, None, Duration::from_secs(5));

        let reply = generator.generate("hello!", &ctx_with_turns(vec![])).await;
        assert!(reply.contains("magical coder"));
    }

    #[tokio::test]
    async fn empty_backend_text_falls_back_to_rules() {
        let backend = Arc::new(MockBackend::succeeding("   "));
        let generator =
            ResponseGenerator::new(backend, "mock-1", 0.7, None, Duration::from_secs(5));

        let reply = generator.generate("hello!", &ctx_with_turns(vec![])).await;
        assert!(reply.contains("magical coder"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out_and_falls_back() {
        let generator = ResponseGenerator::new(
            Arc::new(HangingBackend),
            "mock-1",
            0.7,
            None,
            Duration::from_secs(5),
        );

        let reply = generator.generate("hello!", &ctx_with_turns(vec![])).await;
        assert!(reply.contains("magical coder"));
    }

    #[tokio::test]
    async fn offline_generator_never_panics() {
        let generator = ResponseGenerator::offline();
        let reply = generator.generate("what is a loop?", &ctx_with_turns(vec![])).await;
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn history_is_capped_at_the_sliding_window() {
        let backend = Arc::new(MockBackend::succeeding("ok"));
        let generator = ResponseGenerator::new(
            backend.clone(),
            "mock-1",
            0.7,
            None,
            Duration::from_secs(5),
        );

        let turns: Vec<Turn> = (0..12)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::learner(format!("question {i}"))
                } else {
                    Turn::tutor(format!("answer {i}"))
                }
            })
            .collect();

        generator.generate("next", &ctx_with_turns(turns)).await;

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].history.len(), HISTORY_WINDOW);
        // Window keeps the most recent turns.
        assert_eq!(calls[0].history[HISTORY_WINDOW - 1].content, "answer 11");
    }

    #[tokio::test]
    async fn welcome_is_always_templated() {
        // Even a hanging backend cannot delay the welcome message.
        let generator = ResponseGenerator::new(
            Arc::new(HangingBackend),
            "mock-1",
            0.7,
            None,
            Duration::from_secs(5),
        );

        let w = generator.welcome(&ctx_with_turns(vec![]));
        assert!(w.contains("Emma"));
        assert!(w.contains("Making the Wizard Move"));
    }
}
