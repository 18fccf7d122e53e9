//! Stored change-event models.

use serde::Serialize;
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `events` table: one persisted change notification.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredEvent {
    pub id: DbId,
    pub table_name: String,
    pub op: String,
    pub customer_id: DbId,
    pub member_id: Option<DbId>,
    pub entity_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
