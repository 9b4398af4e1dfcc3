use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scenario_core::model::ScenarioStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Name of the slot holding the serialized scenario store.
pub const SCENARIO_SLOT: &str = "aiScenarios";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a named slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRecord {
    pub name: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

/// Key/value contract for durable named slots.
///
/// Each write replaces the whole payload of the slot; there are no partial writes.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Read a slot by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing slot is `Ok(None)`.
    async fn read_slot(&self, name: &str) -> Result<Option<SlotRecord>, StorageError>;

    /// Replace the payload of a slot, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the payload cannot be stored.
    async fn write_slot(&self, record: &SlotRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, SlotRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SlotRepository for InMemoryRepository {
    async fn read_slot(&self, name: &str) -> Result<Option<SlotRecord>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).cloned())
    }

    async fn write_slot(&self, record: &SlotRecord) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.name.clone(), record.clone());
        Ok(())
    }
}

/// Typed access to the scenario store slot.
///
/// The whole store is one JSON document; no schema versioning.
#[derive(Clone)]
pub struct ScenarioSlot {
    slots: Arc<dyn SlotRepository>,
    name: String,
}

impl ScenarioSlot {
    #[must_use]
    pub fn new(slots: Arc<dyn SlotRepository>) -> Self {
        Self::named(slots, SCENARIO_SLOT)
    }

    #[must_use]
    pub fn named(slots: Arc<dyn SlotRepository>, name: impl Into<String>) -> Self {
        Self {
            slots,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Load and decode the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the payload is not a valid store,
    /// or other storage errors. A missing slot is `Ok(None)`.
    pub async fn load(&self) -> Result<Option<ScenarioStore>, StorageError> {
        let Some(record) = self.slots.read_slot(&self.name).await? else {
            return Ok(None);
        };
        serde_json::from_str(&record.payload)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Encode and write the whole store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save(
        &self,
        store: &ScenarioStore,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let payload = serde_json::to_string(store)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.slots
            .write_slot(&SlotRecord {
                name: self.name.clone(),
                payload,
                updated_at,
            })
            .await
    }

    /// Raw payload currently stored, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn raw(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .slots
            .read_slot(&self.name)
            .await?
            .map(|record| record.payload))
    }
}

/// Aggregates slot storage behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn SlotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let slots: Arc<dyn SlotRepository> = Arc::new(InMemoryRepository::new());
        Self { slots }
    }

    #[must_use]
    pub fn scenario_slot(&self) -> ScenarioSlot {
        ScenarioSlot::new(Arc::clone(&self.slots))
    }
}
