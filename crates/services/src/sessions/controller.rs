use scenario_core::model::{QuestionTemplate, Scenario, ScenarioId};

use super::progress::{AnswerFeedback, SessionProgress};
use crate::error::{RepositoryError, SessionError};
use crate::repository::ScenarioRepository;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the user is in the scenario lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    InProgress {
        scenario_id: ScenarioId,
        index: usize,
    },
    Completed {
        scenario_id: ScenarioId,
    },
}

impl SessionState {
    #[must_use]
    pub fn scenario_id(&self) -> Option<&ScenarioId> {
        match self {
            SessionState::Idle => None,
            SessionState::InProgress { scenario_id, .. }
            | SessionState::Completed { scenario_id } => Some(scenario_id),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionState::Completed { .. })
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Forward-only walk over the questions of one stored scenario.
///
/// The controller holds no scenario data; every call reads through the
/// repository handle it is given.
#[derive(Debug, Default)]
pub struct SessionController {
    state: SessionState,
}

impl SessionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Start the scenario `id` from its first question.
    ///
    /// Allowed from any state; an in-progress scenario is abandoned. A scenario
    /// without questions is completed immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for unknown ids, leaving the state untouched.
    /// Returns `SessionError::Repository` if completing an empty scenario cannot be persisted.
    pub async fn load(
        &mut self,
        repo: &mut ScenarioRepository,
        id: &ScenarioId,
    ) -> Result<&SessionState, SessionError> {
        let question_count = scenario(repo, id)?.question_count();

        if question_count == 0 {
            repo.mark_completed(id).await?;
            self.state = SessionState::Completed {
                scenario_id: id.clone(),
            };
        } else {
            self.state = SessionState::InProgress {
                scenario_id: id.clone(),
                index: 0,
            };
        }
        Ok(&self.state)
    }

    /// Move to the next question, or complete the scenario after the last one.
    ///
    /// Completing marks the scenario completed in the repository.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside `InProgress`,
    /// `SessionError::NotFound` if the scenario disappeared from the repository,
    /// or `SessionError::Repository` if completion cannot be persisted.
    pub async fn advance(
        &mut self,
        repo: &mut ScenarioRepository,
    ) -> Result<&SessionState, SessionError> {
        let SessionState::InProgress { scenario_id, index } = &self.state else {
            return Err(SessionError::NotInProgress);
        };
        let next = index + 1;
        let question_count = scenario(repo, scenario_id)?.question_count();

        if next < question_count {
            self.state = SessionState::InProgress {
                scenario_id: scenario_id.clone(),
                index: next,
            };
        } else {
            let scenario_id = scenario_id.clone();
            repo.mark_completed(&scenario_id).await?;
            self.state = SessionState::Completed { scenario_id };
        }
        Ok(&self.state)
    }

    /// Feedback for option `option_index` of the current question. Does not advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside `InProgress`, or
    /// `SessionError::InvalidOption` if the index is out of range.
    pub fn answer(
        &self,
        repo: &ScenarioRepository,
        option_index: usize,
    ) -> Result<AnswerFeedback, SessionError> {
        let question = self
            .current_question(repo)
            .ok_or(SessionError::NotInProgress)?;
        let option = question
            .option(option_index)
            .ok_or(SessionError::InvalidOption {
                index: option_index,
                available: question.options.len(),
            })?;
        Ok(AnswerFeedback::from_option(option_index, option))
    }

    /// The question being shown, if a scenario is in progress.
    #[must_use]
    pub fn current_question<'a>(
        &self,
        repo: &'a ScenarioRepository,
    ) -> Option<&'a QuestionTemplate> {
        let SessionState::InProgress { scenario_id, index } = &self.state else {
            return None;
        };
        repo.get(scenario_id).ok()?.question(*index)
    }

    #[must_use]
    pub fn progress(&self, repo: &ScenarioRepository) -> Option<SessionProgress> {
        let scenario = repo.get(self.state.scenario_id()?).ok()?;
        let total = scenario.question_count();
        Some(match &self.state {
            SessionState::InProgress { index, .. } => SessionProgress {
                position: index + 1,
                total,
                is_complete: false,
            },
            _ => SessionProgress {
                position: total,
                total,
                is_complete: true,
            },
        })
    }

    /// Drop the active scenario.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

fn scenario<'a>(
    repo: &'a ScenarioRepository,
    id: &ScenarioId,
) -> Result<&'a Scenario, SessionError> {
    repo.get(id).map_err(|err| match err {
        RepositoryError::NotFound(id) => SessionError::NotFound(id),
        other => SessionError::Repository(other),
    })
}
