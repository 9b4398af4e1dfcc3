use scenario_core::Clock;
use scenario_core::model::{Scenario, ScenarioCategory, ScenarioId, ScenarioStore};
use storage::repository::{ScenarioSlot, StorageError};

use crate::error::RepositoryError;
use crate::generation::ScenarioGenerationService;

/// In-memory scenario store backed by a single durable slot.
///
/// Loaded once by [`ScenarioRepository::init`]; every mutation rewrites the
/// whole slot. Two processes sharing a slot are not coordinated: last writer wins.
pub struct ScenarioRepository {
    store: ScenarioStore,
    slot: ScenarioSlot,
    generator: ScenarioGenerationService,
    clock: Clock,
}

impl ScenarioRepository {
    /// Load the store from `slot`.
    ///
    /// A missing or malformed payload yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the slot cannot be read at all.
    pub async fn init(
        slot: ScenarioSlot,
        generator: ScenarioGenerationService,
        clock: Clock,
    ) -> Result<Self, RepositoryError> {
        let store = match slot.load().await {
            Ok(Some(store)) => store,
            Ok(None) => ScenarioStore::new(),
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(
                    slot = slot.name(),
                    %reason,
                    "stored scenarios are unreadable, starting empty"
                );
                ScenarioStore::new()
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(slot = slot.name(), scenarios = store.len(), "scenario store loaded");

        Ok(Self {
            store,
            slot,
            generator,
            clock,
        })
    }

    /// Generate and store a new scenario, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be flushed. The
    /// scenario stays in memory in that case.
    pub async fn create(
        &mut self,
        category: ScenarioCategory,
        count: usize,
    ) -> Result<ScenarioId, RepositoryError> {
        let draft = self.generator.generate(category, count).await;
        let now = self.clock.now();
        let id = ScenarioId::mint(now);

        self.store
            .insert(Scenario::new(id.clone(), category, draft, now));
        tracing::info!(scenario = %id, %category, count, "scenario created");

        self.flush().await?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    pub fn get(&self, id: &ScenarioId) -> Result<&Scenario, RepositoryError> {
        self.store
            .get(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    /// Snapshot of every stored scenario.
    #[must_use]
    pub fn list_all(&self) -> ScenarioStore {
        self.store.clone()
    }

    /// Flag a scenario as completed. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be flushed.
    pub async fn mark_completed(&mut self, id: &ScenarioId) -> Result<(), RepositoryError> {
        let Some(scenario) = self.store.get_mut(id) else {
            return Ok(());
        };
        if scenario.mark_completed() {
            tracing::info!(scenario = %id, "scenario completed");
        }
        self.flush().await
    }

    /// Remove every scenario.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be flushed.
    pub async fn clear_all(&mut self) -> Result<(), RepositoryError> {
        self.store.clear();
        tracing::info!("scenario store cleared");
        self.flush().await
    }

    /// Write the whole store to the slot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if encoding or the write fails.
    pub async fn flush(&self) -> Result<(), RepositoryError> {
        self.slot.save(&self.store, self.clock.now()).await?;
        tracing::debug!(
            slot = self.slot.name(),
            scenarios = self.store.len(),
            "scenario store flushed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::time::fixed_clock;
    use std::sync::Arc;
    use storage::repository::{InMemoryRepository, SlotRecord, SlotRepository, SCENARIO_SLOT};

    async fn repo_with(slots: Arc<InMemoryRepository>) -> ScenarioRepository {
        ScenarioRepository::init(
            ScenarioSlot::new(slots),
            ScenarioGenerationService::offline(),
            fixed_clock(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_persists_incomplete_scenario() {
        let slots = Arc::new(InMemoryRepository::new());
        let mut repo = repo_with(Arc::clone(&slots)).await;

        let id = repo.create(ScenarioCategory::Hiring, 2).await.unwrap();
        let scenario = repo.get(&id).unwrap();
        assert!(!scenario.is_completed());
        assert_eq!(scenario.question_count(), 2);
        assert_eq!(scenario.title(), "Hiring Bias");

        let reloaded = repo_with(slots).await;
        assert_eq!(reloaded.get(&id).unwrap(), scenario);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let repo = repo_with(Arc::new(InMemoryRepository::new())).await;
        let err = repo.get(&ScenarioId::new("nope")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(id) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn mark_completed_ignores_unknown_id() {
        let slots = Arc::new(InMemoryRepository::new());
        let mut repo = repo_with(Arc::clone(&slots)).await;
        repo.mark_completed(&ScenarioId::new("ghost")).await.unwrap();
        assert!(slots.read_slot(SCENARIO_SLOT).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_slot_starts_empty() {
        let slots = Arc::new(InMemoryRepository::new());
        slots
            .write_slot(&SlotRecord {
                name: SCENARIO_SLOT.into(),
                payload: "[1, 2".into(),
                updated_at: fixed_clock().now(),
            })
            .await
            .unwrap();

        let repo = repo_with(slots).await;
        assert!(repo.list_all().is_empty());
    }

    #[tokio::test]
    async fn clear_all_persists_empty_store() {
        let slots = Arc::new(InMemoryRepository::new());
        let mut repo = repo_with(Arc::clone(&slots)).await;
        repo.create(ScenarioCategory::Accessibility, 1).await.unwrap();
        repo.clear_all().await.unwrap();

        assert!(repo.list_all().is_empty());
        let record = slots.read_slot(SCENARIO_SLOT).await.unwrap().unwrap();
        assert_eq!(record.payload, "{}");
    }
}
