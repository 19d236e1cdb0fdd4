//! Learner profile — a read-only copy of the external profile store's record,
//! held by the Session Manager for the session's lifetime.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tier::Tier;

/// A learner as known to this core. Owned by the caller's profile store;
/// the session holds an immutable snapshot taken at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Opaque identifier from the external profile store.
    pub learner_id: String,

    /// Display name used in learner-facing text.
    pub display_name: String,

    /// Age in years. Validated non-negative at construction.
    pub age: i32,
}

impl LearnerProfile {
    /// Build a profile, rejecting negative ages.
    pub fn new(
        learner_id: impl Into<String>,
        display_name: impl Into<String>,
        age: i32,
    ) -> Result<Self> {
        // Tier resolution doubles as age validation.
        Tier::for_age(age)?;
        Ok(Self {
            learner_id: learner_id.into(),
            display_name: display_name.into(),
            age,
        })
    }

    /// The tier derived from this profile's age.
    pub fn tier(&self) -> Tier {
        // Age was validated at construction, so resolution cannot fail.
        Tier::for_age(self.age).expect("profile age validated at construction")
    }
}
