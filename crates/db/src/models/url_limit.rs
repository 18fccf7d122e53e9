//! URL-quota override entity models.

use serde::Serialize;
use skydd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_url_limits` table: extra URL slots granted to one
/// account on top of the default quota.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UrlLimit {
    pub customer_id: DbId,
    pub additional_urls: i32,
    pub updated_at: Timestamp,
}
