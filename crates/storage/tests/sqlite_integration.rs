use std::sync::Arc;

use chrono::Duration;
use scenario_core::model::{Scenario, ScenarioCategory, ScenarioId, ScenarioStore};
use scenario_core::templates::local_draft;
use scenario_core::time::fixed_now;
use storage::repository::{ScenarioSlot, SlotRecord, SlotRepository, Storage};
use storage::sqlite::SqliteRepository;

fn build_store(n: usize) -> ScenarioStore {
    let mut store = ScenarioStore::new();
    for id in 0..n {
        store.insert(Scenario::new(
            ScenarioId::new(format!("scenario-{id}")),
            ScenarioCategory::Microaggressions,
            local_draft(ScenarioCategory::Microaggressions, 2),
            fixed_now(),
        ));
    }
    store
}

#[tokio::test]
async fn sqlite_slot_upserts_and_reads_back() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_slot_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.read_slot("aiScenarios").await.unwrap().is_none());

    let first = SlotRecord {
        name: "aiScenarios".into(),
        payload: "{}".into(),
        updated_at: fixed_now(),
    };
    repo.write_slot(&first).await.unwrap();

    let second = SlotRecord {
        payload: r#"{"a":1}"#.into(),
        updated_at: fixed_now() + Duration::minutes(5),
        ..first.clone()
    };
    repo.write_slot(&second).await.unwrap();

    let fetched = repo.read_slot("aiScenarios").await.unwrap().expect("slot");
    assert_eq!(fetched, second);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn scenario_slot_round_trips_through_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_scenario_slot?mode=memory&cache=shared")
        .await
        .expect("storage");
    let slot = ScenarioSlot::new(Arc::clone(&storage.slots));

    let store = build_store(3);
    slot.save(&store, fixed_now()).await.unwrap();

    let loaded = slot.load().await.unwrap().expect("store present");
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded, store);
}
