//! Lesson domain types.
//!
//! Lessons are immutable curriculum units, statically defined per tier and
//! loaded once at process start. They are never mutated or destroyed at
//! runtime.

use serde::{Deserialize, Serialize};

/// Identifier of a lesson (e.g. `mw_001`, `il_003`, `ps_006`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonId(pub String);

impl LessonId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single curriculum unit with concepts, narrative framing, and mastery
/// criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique lesson ID.
    pub id: LessonId,

    /// Learner-facing title.
    pub title: String,

    /// Ordered concept tags taught by this lesson.
    pub concepts: Vec<String>,

    /// Narrative framing — the story that wraps the lesson's exercises.
    pub story: String,

    /// Free-form list of hands-on activities.
    pub activities: Vec<String>,

    /// Lesson that must be completed first, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<LessonId>,

    /// Description of what mastery of this lesson looks like.
    pub mastery: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_id_display() {
        let id = LessonId::new("mw_001");
        assert_eq!(id.to_string(), "mw_001");
        assert_eq!(id.as_str(), "mw_001");
    }

    #[test]
    fn lesson_serialization_skips_empty_prerequisite() {
        let lesson = Lesson {
            id: "mw_001".into(),
            title: "Making the Wizard Move".into(),
            concepts: vec!["sequence".into()],
            story: "Help the wizard find the crystal".into(),
            activities: vec!["drag wizard blocks".into()],
            prerequisite: None,
            mastery: "Child can move the wizard using sequence blocks".into(),
        };
        let json = serde_json::to_string(&lesson).unwrap();
        assert!(!json.contains("prerequisite"));
    }
}
