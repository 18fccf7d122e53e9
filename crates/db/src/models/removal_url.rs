//! Removal-URL entity models.

use serde::{Deserialize, Serialize};
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `removal_urls` table: one user-submitted URL tracked
/// through the removal pipeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RemovalUrl {
    pub id: DbId,
    pub customer_id: DbId,
    pub url: String,
    /// Wire string of [`skydd_core::status::RemovalStatus`].
    pub current_status: String,
    /// Append-only JSONB array of [`StatusHistoryEntry`] objects.
    pub status_history: serde_json::Value,
    /// Whether the row appears in the customer's "incoming" view.
    pub is_incoming: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RemovalUrl {
    /// Decode the status history. Rows are only ever written through
    /// [`StatusHistoryEntry`], so a malformed array can only come from
    /// manual edits; it decodes as an empty history rather than an error.
    pub fn history(&self) -> Vec<StatusHistoryEntry> {
        serde_json::from_value(self.status_history.clone()).unwrap_or_default()
    }
}

/// One entry in a removal URL's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: String,
    pub at: Timestamp,
}

impl StatusHistoryEntry {
    pub fn now(status: &str) -> Self {
        Self {
            status: status.to_string(),
            at: chrono::Utc::now(),
        }
    }
}
