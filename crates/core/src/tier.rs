//! Curriculum tiers — the three fixed age bands that drive vocabulary,
//! pacing, and lesson content.
//!
//! The bands partition all non-negative ages with no gaps or overlaps:
//! ages above the oldest band saturate to `AdvancedLearner`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// One of three fixed curriculum tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Ages 0–7: visual block coding with magical themes ("Magic Workshop").
    EarlyLearner,
    /// Ages 8–12: advanced blocks and app building ("Innovation Lab").
    IntermediateLearner,
    /// Ages 13+: real programming languages ("Professional Studio").
    AdvancedLearner,
}

impl Tier {
    /// Resolve a learner's age to its tier. Total over non-negative ages;
    /// negative ages are rejected as invalid input.
    ///
    /// Breakpoints are inclusive at 7 and 12: age ≤ 7 is early,
    /// 8 ≤ age ≤ 12 is intermediate, age ≥ 13 is advanced.
    pub fn for_age(age: i32) -> Result<Tier> {
        if age < 0 {
            return Err(SessionError::InvalidInput(format!("negative age: {age}")).into());
        }
        Ok(match age {
            0..=7 => Tier::EarlyLearner,
            8..=12 => Tier::IntermediateLearner,
            _ => Tier::AdvancedLearner,
        })
    }

    /// Human label used in learner-facing text and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::EarlyLearner => "Magic Workshop",
            Tier::IntermediateLearner => "Innovation Lab",
            Tier::AdvancedLearner => "Professional Studio",
        }
    }

    /// Inclusive age range for display. The upper bound of the advanced
    /// band is nominal; resolution saturates above it.
    pub fn age_range(&self) -> &'static str {
        match self {
            Tier::EarlyLearner => "3-7",
            Tier::IntermediateLearner => "8-12",
            Tier::AdvancedLearner => "13-18",
        }
    }

    /// All tiers in pedagogical order.
    pub fn all() -> [Tier; 3] {
        [
            Tier::EarlyLearner,
            Tier::IntermediateLearner,
            Tier::AdvancedLearner,
        ]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
