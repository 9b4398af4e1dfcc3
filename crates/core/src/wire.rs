//! JSON bodies exchanged with the scenario generation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{QuestionTemplate, ScenarioDraft};

/// Complexity hint the client always sends.
pub const REQUEST_COMPLEXITY: &str = "medium";
/// Context hint the client always sends.
pub const REQUEST_CONTEXT: &str = "workplace";

/// Question count assumed when a request omits it.
pub const DEFAULT_QUESTION_COUNT: usize = 3;

/// `POST /api/generate-scenario` request body.
///
/// `scenario_type` stays a raw string: the endpoint tolerates unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenarioRequest {
    #[serde(default = "default_scenario_type")]
    pub scenario_type: String,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GenerateScenarioRequest {
    /// Request as the client sends it, with the fixed complexity and context hints.
    #[must_use]
    pub fn new(scenario_type: impl Into<String>, question_count: usize) -> Self {
        Self {
            scenario_type: scenario_type.into(),
            question_count,
            complexity: Some(REQUEST_COMPLEXITY.to_string()),
            context: Some(REQUEST_CONTEXT.to_string()),
        }
    }
}

fn default_scenario_type() -> String {
    "hiring".to_string()
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenarioResponse {
    pub title: String,
    pub questions: Vec<QuestionTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl From<GenerateScenarioResponse> for ScenarioDraft {
    fn from(response: GenerateScenarioResponse) -> Self {
        Self {
            title: response.title,
            questions: response.questions,
        }
    }
}
