//! Safety decision types.
//!
//! A `SafetyDecision` is computed fresh per utterance by the Safety Filter
//! and never persisted beyond the session's audit records.

use serde::{Deserialize, Serialize};

/// Category of a safety match, for audit and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTag {
    /// Distress signal or request for help outside the coding domain.
    /// Checked before forbidden topics so a distress signal is never
    /// masked by an unrelated topic match.
    Emergency,
    /// Personal-information request, meeting in person, or other
    /// off-limits topic.
    ForbiddenTopic,
}

impl std::fmt::Display for SafetyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyTag::Emergency => f.write_str("emergency"),
            SafetyTag::ForbiddenTopic => f.write_str("forbidden_topic"),
        }
    }
}

/// The outcome of safety-checking a single utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyDecision {
    /// Whether the utterance may proceed to response generation.
    pub permitted: bool,

    /// Substitute tutor message returned instead of a generated reply
    /// when not permitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitute: Option<String>,

    /// Which category matched, when not permitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<SafetyTag>,

    /// The keyword or phrase that triggered the block, for audit logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl SafetyDecision {
    /// An utterance that passed all checks.
    pub fn permitted() -> Self {
        Self {
            permitted: true,
            substitute: None,
            tag: None,
            matched: None,
        }
    }

    /// An utterance blocked with a substitute message.
    pub fn blocked(tag: SafetyTag, matched: impl Into<String>, substitute: impl Into<String>) -> Self {
        Self {
            permitted: false,
            substitute: Some(substitute.into()),
            tag: Some(tag),
            matched: Some(matched.into()),
        }
    }
}
