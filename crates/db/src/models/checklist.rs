//! Guide-completion entity models.

use serde::Serialize;
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `customer_checklist_progress` table: one completed
/// removal guide for one customer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistProgress {
    pub id: DbId,
    pub customer_id: DbId,
    pub guide_slug: String,
    pub completed_at: Timestamp,
}
