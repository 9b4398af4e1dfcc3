use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::category::ScenarioCategory;
use crate::model::ids::ScenarioId;
use crate::model::question::QuestionTemplate;

/// Generated content before it is stored: a title and its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub title: String,
    pub questions: Vec<QuestionTemplate>,
}

/// A stored scenario.
///
/// Only `completed` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    id: ScenarioId,
    title: String,
    questions: Vec<QuestionTemplate>,
    #[serde(rename = "type")]
    category: ScenarioCategory,
    generated_at: DateTime<Utc>,
    completed: bool,
}

impl Scenario {
    #[must_use]
    pub fn new(
        id: ScenarioId,
        category: ScenarioCategory,
        draft: ScenarioDraft,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            questions: draft.questions,
            category,
            generated_at,
            completed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> ScenarioCategory {
        self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionTemplate] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&QuestionTemplate> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flags the scenario as completed. Returns `true` if the flag changed.
    pub fn mark_completed(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }
}

/// All stored scenarios keyed by id.
///
/// Serialized as a single JSON object so the whole store is persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioStore {
    scenarios: BTreeMap<ScenarioId, Scenario>,
}

impl ScenarioStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scenario under its own id, replacing any previous entry.
    pub fn insert(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id().clone(), scenario);
    }

    #[must_use]
    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    pub fn get_mut(&mut self, id: &ScenarioId) -> Option<&mut Scenario> {
        self.scenarios.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioId, &Scenario)> {
        self.scenarios.iter()
    }

    pub fn clear(&mut self) {
        self.scenarios.clear();
    }
}
