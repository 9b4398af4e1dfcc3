use chrono::{DateTime, Utc};

use scenario_core::model::{ScenarioCategory, ScenarioId};

use crate::error::{SessionError, WorkflowError};
use crate::repository::ScenarioRepository;
use crate::sessions::{AnswerFeedback, SessionController, SessionState};

/// Named actions the presentation layer can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    /// Show the scenario menu.
    Start,
    Generate {
        category: ScenarioCategory,
        count: usize,
    },
    Open(ScenarioId),
    SelectOption(usize),
    Advance,
    ClearAll,
}

/// Row of the scenario menu.
///
/// Presentation-agnostic: timestamps are left for the UI to format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: ScenarioId,
    pub title: String,
    pub category: ScenarioCategory,
    pub generated_at: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub scenario_id: ScenarioId,
    pub title: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    /// Set once an option has been picked for this question.
    pub feedback: Option<AnswerFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionView {
    pub scenario_id: ScenarioId,
    pub title: String,
    pub total: usize,
}

/// What the presentation layer should render next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    Menu(Vec<MenuItem>),
    Question(QuestionView),
    Completed(CompletionView),
}

/// Routes intents to the repository and session controller.
pub struct ScenarioWorkflow {
    repository: ScenarioRepository,
    session: SessionController,
    feedback: Option<AnswerFeedback>,
}

impl ScenarioWorkflow {
    #[must_use]
    pub fn new(repository: ScenarioRepository) -> Self {
        Self {
            repository,
            session: SessionController::new(),
            feedback: None,
        }
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    /// Apply `intent` and describe the resulting screen.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError` for unknown scenarios, out-of-range options,
    /// intents that need an active scenario, or persistence failures. The
    /// session is left as it was before the failing intent.
    pub async fn dispatch(&mut self, intent: SessionIntent) -> Result<ViewModel, WorkflowError> {
        match intent {
            SessionIntent::Start => Ok(self.menu()),
            SessionIntent::Generate { category, count } => {
                let id = self.repository.create(category, count).await?;
                self.open(&id).await
            }
            SessionIntent::Open(id) => self.open(&id).await,
            SessionIntent::SelectOption(index) => {
                let feedback = self.session.answer(&self.repository, index)?;
                self.feedback = Some(feedback);
                self.render()
            }
            SessionIntent::Advance => {
                self.session.advance(&mut self.repository).await?;
                self.feedback = None;
                self.render()
            }
            SessionIntent::ClearAll => {
                self.repository.clear_all().await?;
                self.session.reset();
                self.feedback = None;
                Ok(self.menu())
            }
        }
    }

    async fn open(&mut self, id: &ScenarioId) -> Result<ViewModel, WorkflowError> {
        self.session.load(&mut self.repository, id).await?;
        self.feedback = None;
        self.render()
    }

    /// Scenarios ordered by generation time, oldest first.
    fn menu(&self) -> ViewModel {
        let mut items: Vec<MenuItem> = self
            .repository
            .list_all()
            .iter()
            .map(|(id, scenario)| MenuItem {
                id: id.clone(),
                title: scenario.title().to_string(),
                category: scenario.category(),
                generated_at: scenario.generated_at(),
                completed: scenario.is_completed(),
            })
            .collect();
        items.sort_by(|a, b| a.generated_at.cmp(&b.generated_at).then_with(|| a.id.cmp(&b.id)));
        ViewModel::Menu(items)
    }

    fn render(&self) -> Result<ViewModel, WorkflowError> {
        match self.session.state() {
            SessionState::Idle => Ok(self.menu()),
            SessionState::InProgress { scenario_id, index } => {
                let scenario = self.repository.get(scenario_id)?;
                let question = scenario
                    .question(*index)
                    .ok_or(SessionError::NotInProgress)?;
                Ok(ViewModel::Question(QuestionView {
                    scenario_id: scenario_id.clone(),
                    title: scenario.title().to_string(),
                    prompt: question.question.clone(),
                    options: question.options.iter().map(|o| o.text.clone()).collect(),
                    position: index + 1,
                    total: scenario.question_count(),
                    feedback: self.feedback.clone(),
                }))
            }
            SessionState::Completed { scenario_id } => {
                let scenario = self.repository.get(scenario_id)?;
                Ok(ViewModel::Completed(CompletionView {
                    scenario_id: scenario_id.clone(),
                    title: scenario.title().to_string(),
                    total: scenario.question_count(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ScenarioGenerationService;
    use scenario_core::time::fixed_clock;
    use storage::repository::Storage;

    async fn workflow() -> ScenarioWorkflow {
        let repo = ScenarioRepository::init(
            Storage::in_memory().scenario_slot(),
            ScenarioGenerationService::offline(),
            fixed_clock(),
        )
        .await
        .unwrap();
        ScenarioWorkflow::new(repo)
    }

    #[tokio::test]
    async fn start_on_empty_store_shows_empty_menu() {
        let mut flow = workflow().await;
        let view = flow.dispatch(SessionIntent::Start).await.unwrap();
        assert_eq!(view, ViewModel::Menu(Vec::new()));
    }

    #[tokio::test]
    async fn select_option_shows_feedback_without_advancing() {
        let mut flow = workflow().await;
        flow.dispatch(SessionIntent::Generate {
            category: ScenarioCategory::Microaggressions,
            count: 2,
        })
        .await
        .unwrap();

        let ViewModel::Question(view) = flow.dispatch(SessionIntent::SelectOption(0)).await.unwrap()
        else {
            panic!("expected question view");
        };
        assert_eq!(view.position, 1);
        assert!(view.feedback.unwrap().verdict.is_correct());

        let ViewModel::Question(view) = flow.dispatch(SessionIntent::Advance).await.unwrap() else {
            panic!("expected question view");
        };
        assert_eq!(view.position, 2);
        assert!(view.feedback.is_none());
    }

    #[tokio::test]
    async fn bad_option_keeps_previous_feedback() {
        let mut flow = workflow().await;
        flow.dispatch(SessionIntent::Generate {
            category: ScenarioCategory::Hiring,
            count: 1,
        })
        .await
        .unwrap();
        flow.dispatch(SessionIntent::SelectOption(2)).await.unwrap();

        let err = flow.dispatch(SessionIntent::SelectOption(7)).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Session(SessionError::InvalidOption { index: 7, .. })
        ));
        assert_eq!(flow.feedback.as_ref().map(|f| f.option_index), Some(2));
    }

    #[tokio::test]
    async fn clear_all_resets_session() {
        let mut flow = workflow().await;
        flow.dispatch(SessionIntent::Generate {
            category: ScenarioCategory::GenderBias,
            count: 1,
        })
        .await
        .unwrap();

        let view = flow.dispatch(SessionIntent::ClearAll).await.unwrap();
        assert_eq!(view, ViewModel::Menu(Vec::new()));
        assert_eq!(flow.session_state(), &SessionState::Idle);
    }
}
