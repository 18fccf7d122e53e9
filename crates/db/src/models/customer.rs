//! Customer entity models.

use serde::{Deserialize, Serialize};
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub display_name: String,
    pub email: String,
    /// Wire string of [`skydd_core::score::SubscriptionPlan`].
    pub subscription_plan: String,
    /// Presence means an address alert is registered.
    pub street_address: Option<String>,
    /// Onboarding checklist progress: `{ "choose_password": true, ... }`.
    pub onboarding: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a customer (admin dashboard).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub display_name: String,
    pub email: String,
    pub subscription_plan: String,
}

/// Partial update of a customer (admin dashboard). `None` leaves the
/// existing value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub subscription_plan: Option<String>,
}
