use serde::{Deserialize, Serialize};

//
// ─── VERDICT ──────────────────────────────────────────────────────────────────
//

/// Classification of an answer option, driving the feedback shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Partially acceptable answer.
    Warning,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

//
// ─── OPTIONS & QUESTIONS ──────────────────────────────────────────────────────
//

/// One selectable answer with its feedback.
///
/// On the wire the verdict travels under the `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub feedback: String,
    #[serde(rename = "type")]
    pub verdict: Verdict,
}

impl AnswerOption {
    #[must_use]
    pub fn new(text: impl Into<String>, feedback: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            text: text.into(),
            feedback: feedback.into(),
            verdict,
        }
    }
}

/// A question and its ordered answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    pub question: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionTemplate {
    #[must_use]
    pub fn new(question: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            question: question.into(),
            options,
        }
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&AnswerOption> {
        self.options.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_uses_type_key_for_verdict() {
        let option = AnswerOption::new("Speak up", "Good call.", Verdict::Warning);
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["type"], "warning");
        assert!(json.get("verdict").is_none());
    }

    #[test]
    fn parses_wire_question() {
        let raw = r#"{
            "question": "What now?",
            "options": [
                { "text": "A", "feedback": "yes", "type": "correct" },
                { "text": "B", "feedback": "no", "type": "incorrect" }
            ]
        }"#;
        let question: QuestionTemplate = serde_json::from_str(raw).unwrap();
        assert_eq!(question.options.len(), 2);
        assert!(question.option(0).unwrap().verdict.is_correct());
        assert!(question.option(2).is_none());
    }
}
