//! Curriculum Store for the Sparkle tutoring runtime.
//!
//! Lessons are authored in a fixed pedagogical sequence per tier, populated
//! once at process initialization from a static table, and never mutated at
//! runtime. Unknown lesson lookups fail closed with `LessonNotFound` rather
//! than returning a default, to surface caller bugs early.

mod data;
mod store;

pub use store::{CurriculumStore, TierInfo};
