use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::generation::{RemoteConfig, ScenarioGenerationService};
use crate::repository::ScenarioRepository;
use crate::workflow::ScenarioWorkflow;

/// Assembles the app-facing workflow over a storage backend.
pub struct AppServices {
    storage: Storage,
    workflow: ScenarioWorkflow,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the initial
    /// store read fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        remote: Option<RemoteConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, remote).await
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the initial store read fails.
    pub async fn in_memory(
        clock: Clock,
        remote: Option<RemoteConfig>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, remote).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        remote: Option<RemoteConfig>,
    ) -> Result<Self, AppServicesError> {
        if let Some(config) = &remote {
            tracing::info!(base_url = %config.base_url, "remote scenario generation enabled");
        }
        let generator = ScenarioGenerationService::new(remote);
        let repository =
            ScenarioRepository::init(storage.scenario_slot(), generator, clock).await?;

        Ok(Self {
            storage,
            workflow: ScenarioWorkflow::new(repository),
        })
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn workflow_mut(&mut self) -> &mut ScenarioWorkflow {
        &mut self.workflow
    }
}
