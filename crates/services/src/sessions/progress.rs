use scenario_core::model::{AnswerOption, Verdict};

/// Position within the active scenario, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the current question; equals `total` once completed.
    pub position: usize,
    pub total: usize,
    pub is_complete: bool,
}

/// What to show after an option is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub option_index: usize,
    pub text: String,
    pub feedback: String,
    pub verdict: Verdict,
}

impl AnswerFeedback {
    #[must_use]
    pub fn from_option(option_index: usize, option: &AnswerOption) -> Self {
        Self {
            option_index,
            text: option.text.clone(),
            feedback: option.feedback.clone(),
            verdict: option.verdict,
        }
    }
}
