#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, ScenarioSlot, SlotRecord, SlotRepository, Storage, StorageError,
    SCENARIO_SLOT,
};
