//! Shared error types for the services crate.

use thiserror::Error;

use scenario_core::model::ScenarioId;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors from the remote generation attempt.
///
/// Never escapes `ScenarioGenerationService::generate`, which falls back locally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("remote scenario generation is not configured")]
    Disabled,
    #[error("scenario request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ScenarioRepository`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("scenario not found: {0}")]
    NotFound(ScenarioId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("scenario not found: {0}")]
    NotFound(ScenarioId),
    #[error("no scenario in progress")]
    NotInProgress,
    #[error("option {index} out of range ({available} available)")]
    InvalidOption { index: usize, available: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors emitted while dispatching presentation intents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
