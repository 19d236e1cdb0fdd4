//! The Curriculum Store — tier metadata and indexed lesson lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sparkle_core::error::{CurriculumError, Result};
use sparkle_core::lesson::{Lesson, LessonId};
use sparkle_core::tier::Tier;

use crate::data;

/// Display metadata for a tier's curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierInfo {
    pub tier: Tier,
    pub label: String,
    pub age_range: String,
    pub focus: String,
}

/// Static mapping from tier to its ordered lesson list, with an id index.
///
/// Built once at process start; restartable iteration in the same order on
/// every call.
pub struct CurriculumStore {
    lessons: HashMap<Tier, Vec<Lesson>>,
    // lesson id → (owning tier, position in that tier's sequence)
    index: HashMap<LessonId, (Tier, usize)>,
}

impl CurriculumStore {
    /// Build the store from the built-in lesson tables.
    pub fn builtin() -> Self {
        let mut lessons = HashMap::new();
        lessons.insert(Tier::EarlyLearner, data::early_lessons());
        lessons.insert(Tier::IntermediateLearner, data::intermediate_lessons());
        lessons.insert(Tier::AdvancedLearner, data::advanced_lessons());

        let mut index = HashMap::new();
        for (tier, list) in &lessons {
            for (pos, lesson) in list.iter().enumerate() {
                index.insert(lesson.id.clone(), (*tier, pos));
            }
        }

        tracing::debug!(lesson_count = index.len(), "Curriculum store initialized");
        Self { lessons, index }
    }

    /// The ordered lesson sequence for a tier.
    pub fn lessons_for(&self, tier: Tier) -> &[Lesson] {
        self.lessons
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first lesson of a tier.
    pub fn first_lesson(&self, tier: Tier) -> &Lesson {
        // Every tier's table is non-empty by construction.
        &self.lessons_for(tier)[0]
    }

    /// Look up a lesson by id. Fails closed with `LessonNotFound` — there is
    /// no silent fallback to a default lesson.
    pub fn lesson_by_id(&self, id: &LessonId) -> Result<&Lesson> {
        let (tier, pos) = self
            .index
            .get(id)
            .ok_or_else(|| CurriculumError::LessonNotFound(id.to_string()))?;
        Ok(&self.lessons_for(*tier)[*pos])
    }

    /// The tier that owns a lesson.
    pub fn tier_of(&self, id: &LessonId) -> Result<Tier> {
        self.index
            .get(id)
            .map(|(tier, _)| *tier)
            .ok_or_else(|| CurriculumError::LessonNotFound(id.to_string()).into())
    }

    /// The lesson after `id` in its tier's sequence, or `None` if `id` is
    /// the last lesson.
    pub fn next_after(&self, id: &LessonId) -> Result<Option<&Lesson>> {
        let (tier, pos) = self
            .index
            .get(id)
            .ok_or_else(|| CurriculumError::LessonNotFound(id.to_string()))?;
        Ok(self.lessons_for(*tier).get(pos + 1))
    }

    /// Display metadata for a tier.
    pub fn tier_info(&self, tier: Tier) -> TierInfo {
        let focus = match tier {
            Tier::EarlyLearner => "Visual block coding with magical themes and storytelling",
            Tier::IntermediateLearner => {
                "Advanced blocks, app building, and real-world problem solving"
            }
            Tier::AdvancedLearner => {
                "Real programming languages, software engineering, and career preparation"
            }
        };
        TierInfo {
            tier,
            label: tier.label().into(),
            age_range: tier.age_range().into(),
            focus: focus.into(),
        }
    }

    /// Total number of lessons across all tiers.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for CurriculumStore {
    fn default() -> Self {
        Self::builtin()
    }
}
