//! Family-member entity models.

use serde::{Deserialize, Serialize};
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `customer_members` table: a secondary person covered
/// under one customer's subscription.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerMember {
    pub id: DbId,
    pub customer_id: DbId,
    pub display_name: String,
    pub relationship: String,
    pub created_at: Timestamp,
}

/// Input for adding a member to a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub display_name: String,
    pub relationship: String,
}
