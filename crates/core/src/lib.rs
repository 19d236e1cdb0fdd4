//! # Sparkle Core
//!
//! Domain types, traits, and error definitions for the Sparkle tutoring
//! session runtime. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem boundary is defined as a trait here. Implementations live
//! in their respective crates. This enables:
//! - Swapping the generative backend via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod backend;
pub mod error;
pub mod lesson;
pub mod profile;
pub mod safety;
pub mod session;
pub mod tier;

// Re-export key types at crate root for ergonomics
pub use backend::{BackendRequest, BackendResponse, GenerativeBackend};
pub use error::{Error, Result};
pub use lesson::{Lesson, LessonId};
pub use profile::LearnerProfile;
pub use safety::{SafetyDecision, SafetyTag};
pub use session::{Role, Session, SessionId, SessionState, SessionStore, SessionSummary, Turn};
pub use tier::Tier;
