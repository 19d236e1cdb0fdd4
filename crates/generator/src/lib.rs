//! Response generation for the Sparkle tutoring runtime.
//!
//! Two-tier design: a generative backend is tried first under a timeout;
//! on any failure a deterministic rule-based responder answers instead.
//! The learner always receives some encouraging text, even when every
//! backend is down — availability over sophistication.

pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod rules;

pub use gemini::GeminiBackend;
pub use generator::{ResponseGenerator, SessionContext};
pub use rules::RuleResponder;
