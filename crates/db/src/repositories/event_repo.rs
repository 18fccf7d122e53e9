//! Repository for the `events` table (persisted change notifications).

use skydd_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::StoredEvent;

/// Column list for `events` queries.
const COLUMNS: &str = "\
    id, table_name, op, customer_id, member_id, entity_id, payload, created_at";

/// Provides data access for the change-event audit trail.
pub struct EventRepo;

impl EventRepo {
    /// Insert one event row, returning the generated id.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &PgPool,
        table_name: &str,
        op: &str,
        customer_id: DbId,
        member_id: Option<DbId>,
        entity_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events \
                 (table_name, op, customer_id, member_id, entity_id, payload) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(table_name)
        .bind(op)
        .bind(customer_id)
        .bind(member_id)
        .bind(entity_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// List recent events newest-first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StoredEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, StoredEvent>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete events older than the cutoff. Returns the number deleted.
    pub async fn delete_older_than(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
