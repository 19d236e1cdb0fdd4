//! Keyword-based safety scanning.
//!
//! Matching is substring-based over the lowercase-normalized utterance; no
//! stemming or fuzzy matching. Emergency keywords are checked before
//! forbidden topics: a distress signal must never be masked by an unrelated
//! topic match.

use std::hash::{DefaultHasher, Hash, Hasher};

use sparkle_core::safety::{SafetyDecision, SafetyTag};
use tracing::warn;

/// Distress signals and requests for help outside the coding domain.
const EMERGENCY_KEYWORDS: &[&str] = &[
    "help",
    "scared",
    "hurt",
    "unsafe",
    "uncomfortable",
    "don't tell",
    "secret",
    "adult",
    "stranger",
];

/// Fixed substitute for any emergency match.
const EMERGENCY_RESPONSE: &str = "If you need help with anything outside of coding, \
please talk to a parent, teacher, or trusted adult. I'm here to help you learn \
programming! 🛡️";

/// Personal-information requests, meeting in person, and other off-limits
/// topics.
const FORBIDDEN_TOPICS: &[&str] = &[
    "personal information",
    "address",
    "phone number",
    "where you live",
    "what school",
    "meeting in person",
    "meet in person",
    "sharing details",
    "violence",
    "adult content",
    "politics",
    "religion",
    "inappropriate behavior",
    "unsafe activities",
];

/// Substitute pool for forbidden-topic matches. Selection is deterministic
/// (hashed over the normalized utterance), so behavior is reproducible in
/// tests.
const TOPIC_RESPONSES: &[&str] = &[
    "That's not something we talk about in coding class! Let's focus on creating \
amazing programs instead! 🌟",
    "I'm here to help you learn coding magic! What would you like to build today? ✨",
    "Let's keep our conversation about coding and programming! What coding adventure \
interests you? 🚀",
];

/// Scans free-text learner input against fixed keyword lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyFilter;

impl SafetyFilter {
    pub fn new() -> Self {
        Self
    }

    /// Check one utterance. Never fails; an utterance either passes or gets
    /// a substitute message.
    pub fn check(&self, utterance: &str) -> SafetyDecision {
        let normalized = utterance.to_lowercase();

        // Emergency keywords take priority over topic matches.
        for keyword in EMERGENCY_KEYWORDS {
            if normalized.contains(keyword) {
                warn!(tag = %SafetyTag::Emergency, matched = keyword, "Utterance blocked");
                return SafetyDecision::blocked(
                    SafetyTag::Emergency,
                    *keyword,
                    EMERGENCY_RESPONSE,
                );
            }
        }

        for topic in FORBIDDEN_TOPICS {
            if normalized.contains(topic) {
                let substitute = TOPIC_RESPONSES[pool_index(&normalized, TOPIC_RESPONSES.len())];
                warn!(tag = %SafetyTag::ForbiddenTopic, matched = topic, "Utterance blocked");
                return SafetyDecision::blocked(SafetyTag::ForbiddenTopic, *topic, substitute);
            }
        }

        SafetyDecision::permitted()
    }
}

/// Deterministic index into the substitute pool.
fn pool_index(normalized: &str, len: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    normalized.hash(&mut hasher);
    (hasher.finish() as usize) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_coding_question_is_permitted() {
        let filter = SafetyFilter::new();
        let d = filter.check("How do I make the wizard move?");
        assert!(d.permitted);
        assert!(d.substitute.is_none());
    }

    #[test]
    fn distress_signal_is_emergency() {
        let filter = SafetyFilter::new();
        let d = filter.check("I feel scared and need help");
        assert!(!d.permitted);
        assert_eq!(d.tag, Some(SafetyTag::Emergency));
        assert_eq!(d.substitute.as_deref(), Some(EMERGENCY_RESPONSE));
    }

    #[test]
    fn emergency_outranks_forbidden_topic() {
        // Contains both "scared" (emergency) and "violence" (forbidden).
        let filter = SafetyFilter::new();
        let d = filter.check("the violence scared me");
        assert_eq!(d.tag, Some(SafetyTag::Emergency));
    }

    #[test]
    fn personal_information_request_is_forbidden_topic() {
        let filter = SafetyFilter::new();
        let d = filter.check("What is my address?");
        assert!(!d.permitted);
        assert_eq!(d.tag, Some(SafetyTag::ForbiddenTopic));
        let substitute = d.substitute.unwrap();
        assert!(TOPIC_RESPONSES.contains(&substitute.as_str()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = SafetyFilter::new();
        assert!(!filter.check("TELL ME YOUR SECRET").permitted);
        assert!(!filter.check("Let's Talk POLITICS").permitted);
    }

    #[test]
    fn decision_is_idempotent() {
        let filter = SafetyFilter::new();
        let a = filter.check("can we talk about politics");
        let b = filter.check("can we talk about politics");
        assert_eq!(a.permitted, b.permitted);
        assert_eq!(a.tag, b.tag);
        assert_eq!(a.substitute, b.substitute);
    }

    #[test]
    fn substitute_selection_varies_by_utterance() {
        // Not a strict requirement, but the hash should spread across the
        // pool for at least one of these inputs.
        let filter = SafetyFilter::new();
        let picks: Vec<_> = [
            "what is my address",
            "tell me your address please",
            "address??",
            "give me an address now",
        ]
        .iter()
        .map(|u| filter.check(u).substitute.unwrap())
        .collect();
        let distinct: std::collections::HashSet<_> = picks.iter().collect();
        assert!(!distinct.is_empty());
    }

    #[test]
    fn blocked_decision_records_matched_keyword() {
        let filter = SafetyFilter::new();
        let d = filter.check("I feel hurt");
        assert_eq!(d.matched.as_deref(), Some("hurt"));
    }
}
