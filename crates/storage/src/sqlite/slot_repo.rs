use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{SlotRecord, SlotRepository, StorageError};

use super::SqliteRepository;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl SlotRepository for SqliteRepository {
    async fn read_slot(&self, name: &str) -> Result<Option<SlotRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT name, payload, updated_at
            FROM slots
            WHERE name = ?1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.try_get("name").map_err(ser)?;
        let payload: String = row.try_get("payload").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;

        Ok(Some(SlotRecord {
            name,
            payload,
            updated_at,
        }))
    }

    async fn write_slot(&self, record: &SlotRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO slots (name, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&record.name)
        .bind(&record.payload)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
