//! The Session Manager — the orchestration seam of the tutoring runtime.
//!
//! Every utterance follows the same pipeline: validate → safety check →
//! generate (outside the session lock) → append the turn pair atomically.
//! Blocked utterances short-circuit before generation and still leave a
//! complete exchange in the history, plus an audit flag.

use std::sync::Arc;

use chrono::Utc;
use sparkle_core::error::{Result, SessionError};
use sparkle_core::lesson::{Lesson, LessonId};
use sparkle_core::profile::LearnerProfile;
use sparkle_core::safety::SafetyTag;
use sparkle_core::session::{
    Session, SessionId, SessionState, SessionStore, SessionSummary, Turn,
};
use sparkle_core::tier::Tier;
use sparkle_curriculum::CurriculumStore;
use sparkle_generator::generator::HISTORY_WINDOW;
use sparkle_generator::{ResponseGenerator, SessionContext};
use sparkle_safety::SafetyFilter;
use tracing::{info, warn};

/// What the learner gets back when a session starts.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub session_id: SessionId,
    pub tier: Tier,
    pub lesson_id: LessonId,
    pub lesson_title: String,
    pub welcome: String,
}

/// A tutor reply to one utterance.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    /// Set when the utterance was blocked and `text` is a substitute.
    pub safety_tag: Option<SafetyTag>,
}

/// Orchestrates sessions: tier resolution, curriculum position, safety,
/// generation, and progress accounting.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    curriculum: Arc<CurriculumStore>,
    safety: SafetyFilter,
    generator: Arc<ResponseGenerator>,
    progress_per_turn: u32,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        curriculum: Arc<CurriculumStore>,
        generator: Arc<ResponseGenerator>,
        progress_per_turn: u32,
    ) -> Self {
        Self {
            store,
            curriculum,
            safety: SafetyFilter::new(),
            generator,
            progress_per_turn,
        }
    }

    /// Start a session for a learner.
    ///
    /// The tier is resolved from the age; the session is positioned at the
    /// tier's first lesson unless an explicit lesson is requested, in which
    /// case that lesson must belong to the resolved tier.
    pub async fn create_session(
        &self,
        learner_id: &str,
        display_name: &str,
        age: i32,
        lesson: Option<LessonId>,
    ) -> Result<SessionStart> {
        let profile = LearnerProfile::new(learner_id, display_name, age)?;
        let tier = profile.tier();

        let lesson = match lesson {
            Some(id) => {
                let owner = self.curriculum.tier_of(&id)?;
                if owner != tier {
                    return Err(SessionError::InvalidInput(format!(
                        "lesson '{id}' belongs to {} not {}",
                        owner.label(),
                        tier.label(),
                    ))
                    .into());
                }
                self.curriculum.lesson_by_id(&id)?.clone()
            }
            None => self.curriculum.first_lesson(tier).clone(),
        };

        let session = Session::new(profile.clone(), tier, lesson.id.clone());
        let welcome = self.generator.welcome(&SessionContext {
            tier,
            lesson: lesson.clone(),
            learner_name: profile.display_name.clone(),
            age: profile.age,
            recent: Vec::new(),
        });

        let session_id = self.store.insert(session).await;
        info!(
            session_id = %session_id,
            tier = %tier.label(),
            lesson = %lesson.id,
            "Session created"
        );

        Ok(SessionStart {
            session_id,
            tier,
            lesson_id: lesson.id.clone(),
            lesson_title: lesson.title,
            welcome,
        })
    }

    /// Handle one learner utterance and return the tutor's reply.
    ///
    /// The generative call happens outside the session lock; the lock is
    /// re-taken to append the turn pair, so two concurrent submits can
    /// interleave their generation but never their history writes. If the
    /// caller's future is dropped mid-generation, no partial exchange is
    /// left behind.
    pub async fn submit_utterance(&self, id: &SessionId, utterance: &str) -> Result<Reply> {
        if utterance.trim().is_empty() {
            return Err(SessionError::InvalidInput("utterance is empty".into()).into());
        }

        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let decision = self.safety.check(utterance);
        if !decision.permitted {
            let tag = decision.tag.unwrap_or(SafetyTag::ForbiddenTopic);
            let substitute = decision
                .substitute
                .unwrap_or_else(|| "Let's keep talking about coding! 🌟".into());
            let matched = decision.matched.unwrap_or_default();

            let mut session = handle.lock().await;
            if session.state == SessionState::Closed {
                return Err(SessionError::Closed(id.to_string()).into());
            }
            session.record_safety_flag(tag, matched);
            session.push_exchange(Turn::learner(utterance), Turn::tutor(&substitute));
            warn!(session_id = %id, tag = %tag, "Utterance substituted");

            return Ok(Reply {
                text: substitute,
                safety_tag: Some(tag),
            });
        }

        // Snapshot everything the generator needs, then release the lock
        // for the duration of the backend call.
        let ctx = {
            let session = handle.lock().await;
            if session.state == SessionState::Closed {
                return Err(SessionError::Closed(id.to_string()).into());
            }
            SessionContext {
                tier: session.tier,
                lesson: self.curriculum.lesson_by_id(&session.lesson_id)?.clone(),
                learner_name: session.profile.display_name.clone(),
                age: session.profile.age,
                recent: session.recent_turns(HISTORY_WINDOW),
            }
        };

        let text = self.generator.generate(utterance, &ctx).await;

        // The session may have been closed or evicted while the backend
        // call was in flight; appending to a detached session would lose
        // the exchange silently.
        let mut session = handle.lock().await;
        if session.state == SessionState::Closed {
            return Err(SessionError::Closed(id.to_string()).into());
        }
        if self.store.get(id).await.is_none() {
            return Err(SessionError::NotFound(id.to_string()).into());
        }
        session.push_exchange(Turn::learner(utterance), Turn::tutor(&text));
        session.progress += self.progress_per_turn;
        session.lesson_progress += self.progress_per_turn;

        Ok(Reply {
            text,
            safety_tag: None,
        })
    }

    /// Move the session to the next lesson in its tier's sequence.
    ///
    /// Resets the per-lesson progress counter; overall progress is never
    /// reset. Advancing past the last lesson is an error, not a wrap.
    pub async fn advance_lesson(&self, id: &SessionId) -> Result<Lesson> {
        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let mut session = handle.lock().await;
        if session.state == SessionState::Closed {
            return Err(SessionError::Closed(id.to_string()).into());
        }

        let next = self
            .curriculum
            .next_after(&session.lesson_id)?
            .cloned()
            .ok_or_else(|| SessionError::NoNextLesson {
                current: session.lesson_id.to_string(),
                tier: session.tier.label().to_string(),
            })?;

        session.lesson_id = next.id.clone();
        session.lesson_progress = 0;
        session.last_activity = Utc::now();
        info!(session_id = %id, lesson = %next.id, "Lesson advanced");

        Ok(next)
    }

    /// Structured snapshot of a session.
    pub async fn summary(&self, id: &SessionId) -> Result<SessionSummary> {
        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let session = handle.lock().await;
        Ok(self.summarize(&session)?)
    }

    /// Close a session and remove it from the store, returning its final
    /// summary.
    pub async fn close_session(&self, id: &SessionId) -> Result<SessionSummary> {
        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let summary = {
            let mut session = handle.lock().await;
            session.state = SessionState::Closed;
            self.summarize(&session)?
        };

        self.store.remove(id).await;
        info!(session_id = %id, turns = summary.turn_count, "Session closed");
        Ok(summary)
    }

    /// The curriculum backing this manager.
    pub fn curriculum(&self) -> &CurriculumStore {
        &self.curriculum
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    fn summarize(&self, session: &Session) -> Result<SessionSummary> {
        let lesson = self.curriculum.lesson_by_id(&session.lesson_id)?;
        Ok(SessionSummary {
            session_id: session.id.clone(),
            tier: session.tier,
            tier_label: session.tier.label().to_string(),
            lesson_id: session.lesson_id.clone(),
            lesson_title: lesson.title.clone(),
            progress: session.progress,
            turn_count: session.turns.len(),
            state: session.state,
        })
    }
}
