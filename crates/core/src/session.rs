//! Session and Turn domain types.
//!
//! These are the core value objects that flow through the entire system:
//! a learner submits an utterance → the Session Manager safety-checks it →
//! the Response Generator replies → both turns are appended to the session.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::lesson::LessonId;
use crate::profile::LearnerProfile;
use crate::safety::SafetyTag;
use crate::tier::Tier;

/// Unique identifier for a tutoring session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The child at the keyboard (or microphone).
    Learner,
    /// The tutor persona.
    Tutor,
}

/// One message in a session's history. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn.
    pub role: Role,

    /// The text content.
    pub content: String,

    /// Timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new learner turn.
    pub fn learner(content: impl Into<String>) -> Self {
        Self {
            role: Role::Learner,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new tutor turn.
    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            role: Role::Tutor,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A safety block recorded on the session for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyFlag {
    pub tag: SafetyTag,
    pub matched: String,
    pub timestamp: DateTime<Utc>,
}

/// Lifecycle state of a session.
///
/// `Created → Active → Closed` (terminal). Idle sessions are evicted by the
/// background sweep rather than transitioned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    Active,
    Closed,
}

/// The stateful, per-learner conversational context.
///
/// Mutated only by the Session Manager while holding the session's lock;
/// history is append-only and never edited or removed except by whole-session
/// eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID.
    pub id: SessionId,

    /// Snapshot of the learner's profile, taken at creation.
    pub profile: LearnerProfile,

    /// Tier resolved from the profile's age at creation.
    pub tier: Tier,

    /// Current lesson pointer.
    pub lesson_id: LessonId,

    /// Ordered, append-only history.
    pub turns: Vec<Turn>,

    /// Monotonically increasing overall progress counter. Never reset.
    pub progress: u32,

    /// Progress within the current lesson. Reset on lesson advance.
    pub lesson_progress: u32,

    /// Safety blocks recorded during this session.
    pub safety_flags: Vec<SafetyFlag>,

    /// Lifecycle state.
    pub state: SessionState,

    /// When this session was created.
    pub created_at: DateTime<Utc>,

    /// When the last operation touched this session. Drives idle eviction.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session for a learner, positioned at a lesson.
    pub fn new(profile: LearnerProfile, tier: Tier, lesson_id: LessonId) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            profile,
            tier,
            lesson_id,
            turns: Vec::new(),
            progress: 0,
            lesson_progress: 0,
            safety_flags: Vec::new(),
            state: SessionState::Created,
            created_at: now,
            last_activity: now,
        }
    }

    /// Append a learner/tutor turn pair atomically.
    ///
    /// This is the only way turns enter a session: either both turns of an
    /// exchange are appended, or neither.
    pub fn push_exchange(&mut self, learner: Turn, tutor: Turn) {
        debug_assert_eq!(learner.role, Role::Learner);
        debug_assert_eq!(tutor.role, Role::Tutor);
        self.turns.push(learner);
        self.turns.push(tutor);
        self.state = SessionState::Active;
        self.last_activity = Utc::now();
    }

    /// The most recent `n` turns, oldest first — the sliding context window.
    pub fn recent_turns(&self, n: usize) -> Vec<Turn> {
        let start = self.turns.len().saturating_sub(n);
        self.turns[start..].to_vec()
    }

    /// Record a safety block on this session.
    pub fn record_safety_flag(&mut self, tag: SafetyTag, matched: impl Into<String>) {
        self.safety_flags.push(SafetyFlag {
            tag,
            matched: matched.into(),
            timestamp: Utc::now(),
        });
    }

    /// Seconds since the last operation touched this session.
    pub fn idle_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_activity).num_seconds()
    }
}

/// Structured summary of a session, serializable for whatever transport
/// wraps this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub tier: Tier,
    pub tier_label: String,
    pub lesson_id: LessonId,
    pub lesson_title: String,
    pub progress: u32,
    pub turn_count: usize,
    pub state: SessionState,
}

/// The session store abstraction.
///
/// An injectable key-value store mapping session ids to lock-guarded
/// sessions. The in-memory implementation lives in `sparkle-session`;
/// multi-process deployments can substitute an external cache. Never a
/// bare module-level mutable.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// A human-readable name for this store (e.g. "in_memory").
    fn name(&self) -> &str;

    /// Insert a session, returning its id.
    async fn insert(&self, session: Session) -> SessionId;

    /// Look up a session by id. The returned handle's mutex serializes all
    /// operations on that session.
    async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>>;

    /// Remove a session, returning it if present. Callers sweeping for idle
    /// eviction must take the session's lock before removal.
    async fn remove(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>>;

    /// All live session ids.
    async fn ids(&self) -> Vec<SessionId>;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// Whether the store is empty.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        let profile = LearnerProfile::new("child_123", "Emma", 6).unwrap();
        let tier = profile.tier();
        Session::new(profile, tier, "mw_001".into())
    }

    #[test]
    fn push_exchange_appends_exactly_two_turns() {
        let mut s = test_session();
        assert!(s.turns.is_empty());
        s.push_exchange(Turn::learner("hello"), Turn::tutor("hi there"));
        assert_eq!(s.turns.len(), 2);
        assert_eq!(s.turns[0].role, Role::Learner);
        assert_eq!(s.turns[1].role, Role::Tutor);
        assert_eq!(s.state, SessionState::Active);
    }

    #[test]
    fn recent_turns_is_a_sliding_window() {
        let mut s = test_session();
        for i in 0..6 {
            s.push_exchange(
                Turn::learner(format!("q{i}")),
                Turn::tutor(format!("a{i}")),
            );
        }
        let window = s.recent_turns(5);
        assert_eq!(window.len(), 5);
        // Oldest dropped first: window starts mid-history.
        assert_eq!(window.last().unwrap().content, "a5");
    }

    #[test]
    fn recent_turns_handles_short_history() {
        let mut s = test_session();
        s.push_exchange(Turn::learner("hi"), Turn::tutor("hello"));
        assert_eq!(s.recent_turns(5).len(), 2);
    }

    #[test]
    fn safety_flags_accumulate() {
        let mut s = test_session();
        s.record_safety_flag(SafetyTag::Emergency, "scared");
        s.record_safety_flag(SafetyTag::ForbiddenTopic, "address");
        assert_eq!(s.safety_flags.len(), 2);
        assert_eq!(s.safety_flags[0].tag, SafetyTag::Emergency);
    }

    #[test]
    fn session_serialization_roundtrip() {
        let s = test_session();
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, s.id);
        assert_eq!(back.tier, Tier::EarlyLearner);
    }
}
