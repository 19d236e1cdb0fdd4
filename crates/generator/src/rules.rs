//! Deterministic rule-based responder — the fallback when the generative
//! backend is unavailable, and the source of templated welcome messages.
//!
//! Utterances are keyword-matched against a small ordered set of intent
//! categories; the first match wins and the reply is banded by tier. No
//! randomness anywhere: the same utterance and tier always produce the
//! same reply.

use sparkle_core::tier::Tier;

/// Intent categories, checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Stuck,
    Question,
    Play,
    Other,
}

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const STUCK_KEYWORDS: &[&str] = &["stuck", "confused", "don't understand", "can't figure"];
const QUESTION_KEYWORDS: &[&str] = &["what", "how", "why", "when"];
const PLAY_KEYWORDS: &[&str] = &["fun", "game", "play"];

/// Classify an utterance into the first matching intent.
///
/// Greetings are matched as standalone words so that "hi" greets but
/// "this" does not; the other categories use substring matching.
pub fn classify(utterance: &str) -> Intent {
    let normalized = utterance.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| normalized.contains(k));
    let is_greeting = normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETING_KEYWORDS.contains(&word));

    if is_greeting {
        Intent::Greeting
    } else if matches(STUCK_KEYWORDS) {
        Intent::Stuck
    } else if matches(QUESTION_KEYWORDS) {
        Intent::Question
    } else if matches(PLAY_KEYWORDS) {
        Intent::Play
    } else {
        Intent::Other
    }
}

/// The canned-reply responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleResponder;

impl RuleResponder {
    pub fn new() -> Self {
        Self
    }

    /// Produce an age-banded reply for an utterance. Total: every utterance
    /// gets some encouraging text.
    pub fn respond(&self, utterance: &str, tier: Tier) -> String {
        let reply = match (classify(utterance), tier) {
            (Intent::Greeting, Tier::EarlyLearner) => {
                "✨ Hello there, magical coder! I'm so excited to help you learn coding \
spells today! What would you like to create? 🧙‍♂️"
            }
            (Intent::Greeting, Tier::IntermediateLearner) => {
                "🚀 Hey there! Ready to build something amazing? I'm here to help you \
with any coding questions you have! What project are you working on? 💡"
            }
            (Intent::Greeting, Tier::AdvancedLearner) => {
                "👋 Hello! I'm here to help you with your programming journey. What \
coding challenge can we tackle together today? 💻"
            }
            (Intent::Stuck, Tier::EarlyLearner) => {
                "✨ No worries, young wizard! Learning magic takes practice! Let's break \
this down into smaller, easier steps. What part is tricky for you? 🌟"
            }
            (Intent::Stuck, Tier::IntermediateLearner) => {
                "🔧 That's totally normal when learning to code! Let's work through this \
together step by step. Can you tell me exactly where you're getting stuck? 🚀"
            }
            (Intent::Stuck, Tier::AdvancedLearner) => {
                "💡 Debugging is a crucial skill in programming! Let's analyze the \
problem systematically. Can you describe the specific issue you're encountering? 🔍"
            }
            (Intent::Question, Tier::EarlyLearner) => {
                "✨ Great question, little wizard! I love curious minds! In coding magic, \
we use special blocks and spells to make the computer do what we want. What \
specifically would you like to know more about? 🎯"
            }
            (Intent::Question, Tier::IntermediateLearner) => {
                "🔬 Excellent question! Understanding the 'why' behind coding concepts is \
super important. What are you trying to build? 🚀"
            }
            (Intent::Question, Tier::AdvancedLearner) => {
                "🎓 That's a thoughtful question that shows you're thinking like a \
programmer! Let me walk you through it with some practical examples. 💻"
            }
            (Intent::Play, Tier::EarlyLearner) => {
                "🎮 Oh, I LOVE making games and fun projects! Coding is like playing with \
magical building blocks! What kind of fun project sounds exciting to you? ✨"
            }
            (Intent::Play, Tier::IntermediateLearner) => {
                "🎯 Games are an awesome way to learn coding! You can create your own \
characters, design levels, add scoring systems, and so much more! What type of \
game interests you most? 🚀"
            }
            (Intent::Play, Tier::AdvancedLearner) => {
                "🎮 Game development is a fantastic application of programming skills! \
Are you interested in 2D games, 3D games, or perhaps mobile game development? 💡"
            }
            (Intent::Other, Tier::EarlyLearner) => {
                "✨ That's a wonderful thing to think about! In our magical coding world, \
there are so many amazing things we can create together! Tell me more about what \
you're curious about! 🌟"
            }
            (Intent::Other, Tier::IntermediateLearner) => {
                "🚀 I love your curiosity! That's exactly the kind of thinking that makes \
great programmers! Let's explore this together and see what cool solutions we can \
come up with! 💡"
            }
            (Intent::Other, Tier::AdvancedLearner) => {
                "💻 That's an interesting perspective! Critical thinking like this is \
essential in software development. Let's dive deeper into this concept. 🎯"
            }
        };
        reply.to_string()
    }

    /// The templated welcome message for a new session. Always deterministic
    /// and instant — welcome messages never hit the generative backend.
    pub fn welcome(&self, tier: Tier, learner_name: &str, lesson_title: &str) -> String {
        match tier {
            Tier::EarlyLearner => format!(
                "✨ Hello there, {learner_name}! I'm Professor Sparkle, your magical \
coding tutor! 🧙‍♂️ Welcome to the {label}! Today we're going on an adventure called \
\"{lesson_title}\". Remember, in my classroom there are no mistakes — only magical \
discoveries! Shall we begin? 🪄",
                label = tier.label(),
            ),
            Tier::IntermediateLearner => format!(
                "🚀 Greetings, {learner_name}! I'm Professor Sparkle, and welcome to \
the {label}! You're about to embark on an exciting journey where we'll build \
amazing things and solve real problems with code. Today's mission: \
\"{lesson_title}\". Ready to become a young inventor? 🔬",
                label = tier.label(),
            ),
            Tier::AdvancedLearner => format!(
                "💼 Welcome, {learner_name}! I'm Professor Sparkle, your guide to \
professional programming. You've reached the {label} — today we're diving into \
\"{lesson_title}\". Here we use the same tools and languages professional \
developers use every day. Ready to code like a pro? 💻",
                label = tier.label(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_is_matched_first() {
        assert_eq!(classify("Hello Professor!"), Intent::Greeting);
        assert_eq!(classify("hey, what is a loop?"), Intent::Greeting);
    }

    #[test]
    fn bare_hi_is_a_greeting() {
        assert_eq!(classify("hi"), Intent::Greeting);
        assert_eq!(classify("Hi!"), Intent::Greeting);
    }

    #[test]
    fn greeting_words_match_whole_words_only() {
        // "this" contains "hi" and "they" contains "hey".
        assert_eq!(classify("this"), Intent::Other);
        assert_eq!(classify("they said so"), Intent::Other);
    }

    #[test]
    fn stuck_beats_question() {
        assert_eq!(classify("I'm stuck, what do I do?"), Intent::Stuck);
    }

    #[test]
    fn question_words_classify_as_question() {
        assert_eq!(classify("why does my loop never end"), Intent::Question);
    }

    #[test]
    fn play_requests_classify_as_play() {
        assert_eq!(classify("can we make a game"), Intent::Play);
    }

    #[test]
    fn anything_else_is_other() {
        assert_eq!(classify("loops"), Intent::Other);
    }

    #[test]
    fn responses_are_deterministic() {
        let rules = RuleResponder::new();
        let a = rules.respond("hello!", Tier::EarlyLearner);
        let b = rules.respond("hello!", Tier::EarlyLearner);
        assert_eq!(a, b);
    }

    #[test]
    fn responses_are_banded_by_tier() {
        let rules = RuleResponder::new();
        let early = rules.respond("hello!", Tier::EarlyLearner);
        let advanced = rules.respond("hello!", Tier::AdvancedLearner);
        assert_ne!(early, advanced);
        assert!(early.contains("magical"));
    }

    #[test]
    fn every_intent_and_tier_yields_nonempty_text() {
        let rules = RuleResponder::new();
        for utterance in ["hello", "i'm stuck", "what is this", "let's play", "zzz"] {
            for tier in Tier::all() {
                assert!(!rules.respond(utterance, tier).is_empty());
            }
        }
    }

    #[test]
    fn welcome_mentions_name_and_lesson() {
        let rules = RuleResponder::new();
        let w = rules.welcome(Tier::EarlyLearner, "Emma", "Making the Wizard Move");
        assert!(w.contains("Emma"));
        assert!(w.contains("Making the Wizard Move"));
        assert!(w.contains("Magic Workshop"));
    }

    #[test]
    fn welcome_voice_differs_by_tier() {
        let rules = RuleResponder::new();
        let early = rules.welcome(Tier::EarlyLearner, "Emma", "Lesson");
        let advanced = rules.welcome(Tier::AdvancedLearner, "Sam", "Lesson");
        assert!(early.contains("magical"));
        assert!(advanced.contains("professional"));
    }
}
