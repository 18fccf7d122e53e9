//! Site-status entity models.

use serde::{Deserialize, Serialize};
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `customer_site_statuses` table: visibility of one
/// person's data on one covered site.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteStatus {
    pub id: DbId,
    pub customer_id: DbId,
    /// `None` means the primary account holder.
    pub member_id: Option<DbId>,
    pub site_name: String,
    /// Wire string of [`skydd_core::site::SiteVisibility`].
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for upserting a site status row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSiteStatus {
    pub member_id: Option<DbId>,
    pub site_name: String,
    pub status: String,
}
