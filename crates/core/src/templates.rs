//! Static question templates, the local source of scenario content.
//!
//! Lookup is total over [`ScenarioCategory`]: categories without authored
//! templates share the default (`hiring`) list. Indexing is cyclic, so asking
//! for more questions than a list holds repeats templates.

use std::sync::LazyLock;

use crate::model::{AnswerOption, QuestionTemplate, ScenarioCategory, ScenarioDraft, Verdict};

/// Title used when a raw category key does not name a known category.
pub const DEFAULT_TITLE: &str = "Workplace Scenario";

static HIRING: LazyLock<Vec<QuestionTemplate>> = LazyLock::new(|| {
    vec![QuestionTemplate::new(
        "You're reviewing resumes and notice a pattern of rejecting candidates from certain schools. What do you do?",
        vec![
            AnswerOption::new(
                "Evaluate if school bias is affecting decisions and adjust criteria.",
                "✅ Correct! Examining selection criteria helps reduce bias.",
                Verdict::Correct,
            ),
            AnswerOption::new(
                "Assume the pattern reflects candidate quality.",
                "❌ Wrong. This ignores potential bias in evaluation.",
                Verdict::Incorrect,
            ),
            AnswerOption::new(
                "Continue with current process but note the pattern.",
                "⚠️ Not sufficient — awareness without action maintains bias.",
                Verdict::Warning,
            ),
        ],
    )]
});

static MICROAGGRESSIONS: LazyLock<Vec<QuestionTemplate>> = LazyLock::new(|| {
    vec![QuestionTemplate::new(
        "A colleague says to an Asian coworker, 'Where are you really from?' How do you respond?",
        vec![
            AnswerOption::new(
                "Politely explain why the question can be othering and suggest alternatives.",
                "✅ Correct! Educational responses promote understanding.",
                Verdict::Correct,
            ),
            AnswerOption::new(
                "Ignore it as harmless curiosity.",
                "❌ Wrong. Microaggressions cause harm even when unintentional.",
                Verdict::Incorrect,
            ),
            AnswerOption::new(
                "Answer for your colleague to deflect the question.",
                "⚠️ Not ideal — doesn't address the underlying issue.",
                Verdict::Warning,
            ),
        ],
    )]
});

/// Template list for a category. Never empty.
#[must_use]
pub fn templates_for(category: ScenarioCategory) -> &'static [QuestionTemplate] {
    match category {
        ScenarioCategory::Microaggressions => MICROAGGRESSIONS.as_slice(),
        ScenarioCategory::Hiring
        | ScenarioCategory::PsychologicalSafety
        | ScenarioCategory::CulturalStereotypes
        | ScenarioCategory::Accessibility
        | ScenarioCategory::GenderBias
        | ScenarioCategory::Leadership => HIRING.as_slice(),
    }
}

/// Template at `index`, wrapping around the category's list.
#[must_use]
pub fn template_at(category: ScenarioCategory, index: usize) -> &'static QuestionTemplate {
    let templates = templates_for(category);
    &templates[index % templates.len()]
}

/// Builds a draft of `count` questions from the local templates.
#[must_use]
pub fn local_draft(category: ScenarioCategory, count: usize) -> ScenarioDraft {
    ScenarioDraft {
        title: category.title().to_string(),
        questions: (0..count)
            .map(|index| template_at(category, index).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_templates() {
        for category in ScenarioCategory::ALL {
            assert!(!templates_for(category).is_empty(), "{category}");
        }
    }

    #[test]
    fn unauthored_categories_share_default_list() {
        let default = templates_for(ScenarioCategory::DEFAULT);
        assert_eq!(templates_for(ScenarioCategory::Accessibility), default);
        assert_eq!(templates_for(ScenarioCategory::Leadership), default);
        assert_ne!(templates_for(ScenarioCategory::Microaggressions), default);
    }

    #[test]
    fn lookup_wraps_around() {
        for category in ScenarioCategory::ALL {
            let len = templates_for(category).len();
            for index in 0..len * 3 {
                assert_eq!(template_at(category, index), template_at(category, index % len));
            }
        }
    }

    #[test]
    fn local_draft_has_requested_length() {
        for count in [0, 1, 2, 5] {
            let draft = local_draft(ScenarioCategory::Microaggressions, count);
            assert_eq!(draft.questions.len(), count);
            assert_eq!(draft.title, "Microaggressions");
        }
    }

    #[test]
    fn warning_feedback_keeps_authored_text() {
        let hiring = template_at(ScenarioCategory::Hiring, 0);
        assert_eq!(
            hiring.options[2].feedback,
            "⚠️ Not sufficient — awareness without action maintains bias."
        );
        let micro = template_at(ScenarioCategory::Microaggressions, 0);
        assert_eq!(
            micro.options[2].feedback,
            "⚠️ Not ideal — doesn't address the underlying issue."
        );
        assert_eq!(micro.options[2].verdict, Verdict::Warning);
    }

    #[test]
    fn hiring_repeats_single_template() {
        let draft = local_draft(ScenarioCategory::Hiring, 3);
        assert_eq!(draft.questions[0], draft.questions[1]);
        assert_eq!(draft.questions[1], draft.questions[2]);
    }
}
