//! System-instruction assembly from tier style tables and lesson context.
//!
//! The style tables reproduce the tutor's age-banded register: short
//! sentences and magical framing for early learners, open-ended questions
//! for intermediates, professional framing for advanced students.

use sparkle_core::tier::Tier;

use crate::generator::SessionContext;

/// How the tutor should speak to a given tier.
#[derive(Debug, Clone, Copy)]
pub struct TierStyle {
    pub vocabulary: &'static str,
    pub sentence_length: &'static str,
    pub encouragement: &'static str,
    pub pacing: &'static str,
    pub framing: &'static str,
}

/// The fixed style table, keyed by tier.
pub fn style_for(tier: Tier) -> TierStyle {
    match tier {
        Tier::EarlyLearner => TierStyle {
            vocabulary: "very simple",
            sentence_length: "short",
            encouragement: "high",
            pacing: "slow",
            framing: "concrete and magical — spells, wizards, and adventures",
        },
        Tier::IntermediateLearner => TierStyle {
            vocabulary: "intermediate",
            sentence_length: "medium",
            encouragement: "medium",
            pacing: "moderate",
            framing: "balanced abstraction — apps, games, and open-ended questions",
        },
        Tier::AdvancedLearner => TierStyle {
            vocabulary: "advanced",
            sentence_length: "long",
            encouragement: "low",
            pacing: "fast",
            framing: "professional — real languages, industry practices, minimal decoration",
        },
    }
}

/// Build the system instruction sent to the generative backend.
pub fn build_system_prompt(ctx: &SessionContext) -> String {
    let style = style_for(ctx.tier);
    let concepts = ctx.lesson.concepts.join(", ");

    format!(
        "You are Professor Sparkle, an experienced, patient, and encouraging AI \
coding tutor for children.\n\
\n\
STUDENT PROFILE:\n\
- Name: {name}\n\
- Age: {age} years old\n\
- Learning Tier: {tier} (ages {range})\n\
\n\
TEACHING STYLE FOR THIS TIER:\n\
- Vocabulary: {vocabulary}\n\
- Sentence length: {sentence_length}\n\
- Encouragement frequency: {encouragement}\n\
- Pace: {pacing}\n\
- Framing: {framing}\n\
\n\
CURRENT LESSON:\n\
- Title: {lesson_title}\n\
- Concepts: {concepts}\n\
- Story: {story}\n\
- Mastery criterion: {mastery}\n\
\n\
SAFETY PROTOCOLS (CRITICAL):\n\
- NEVER ask for personal information\n\
- NEVER suggest meeting in person\n\
- NEVER discuss inappropriate topics\n\
- NEVER provide incorrect coding information\n\
- ALWAYS redirect off-topic questions to educational content\n\
- ALWAYS encourage asking parents for permission\n\
\n\
RESPONSE GUIDELINES:\n\
- Keep responses age-appropriate and never overwhelming\n\
- Break complex concepts into simple steps\n\
- End with a question or call to action",
        name = ctx.learner_name,
        age = ctx.age,
        tier = ctx.tier.label(),
        range = ctx.tier.age_range(),
        vocabulary = style.vocabulary,
        sentence_length = style.sentence_length,
        encouragement = style.encouragement,
        pacing = style.pacing,
        framing = style.framing,
        lesson_title = ctx.lesson.title,
        concepts = concepts,
        story = ctx.lesson.story,
        mastery = ctx.lesson.mastery,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::lesson::Lesson;

    fn ctx(tier: Tier) -> SessionContext {
        SessionContext {
            tier,
            lesson: Lesson {
                id: "mw_001".into(),
                title: "Making the Wizard Move".into(),
                concepts: vec!["sequence".into(), "movement".into()],
                story: "Help the wizard find the crystal".into(),
                activities: vec![],
                prerequisite: None,
                mastery: "Child can move the wizard using sequence blocks".into(),
            },
            learner_name: "Emma".into(),
            age: 6,
            recent: vec![],
        }
    }

    #[test]
    fn prompt_includes_profile_and_lesson() {
        let prompt = build_system_prompt(&ctx(Tier::EarlyLearner));
        assert!(prompt.contains("Emma"));
        assert!(prompt.contains("Making the Wizard Move"));
        assert!(prompt.contains("sequence, movement"));
        assert!(prompt.contains("Magic Workshop"));
    }

    #[test]
    fn style_differs_by_tier() {
        let early = style_for(Tier::EarlyLearner);
        let advanced = style_for(Tier::AdvancedLearner);
        assert_eq!(early.sentence_length, "short");
        assert_eq!(advanced.sentence_length, "long");
        assert_eq!(early.encouragement, "high");
        assert_eq!(advanced.encouragement, "low");
    }

    #[test]
    fn prompt_always_carries_safety_protocols() {
        for tier in Tier::all() {
            let prompt = build_system_prompt(&ctx(tier));
            assert!(prompt.contains("NEVER ask for personal information"));
        }
    }
}
