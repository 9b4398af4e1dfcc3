#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod generation;
pub mod repository;
pub mod sessions;
pub mod workflow;

pub use scenario_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, GenerationError, RepositoryError, SessionError, WorkflowError};
pub use generation::{RemoteConfig, ScenarioGenerationService};
pub use repository::ScenarioRepository;
pub use sessions::{AnswerFeedback, SessionController, SessionProgress, SessionState};
pub use workflow::{
    CompletionView, MenuItem, QuestionView, ScenarioWorkflow, SessionIntent, ViewModel,
};
