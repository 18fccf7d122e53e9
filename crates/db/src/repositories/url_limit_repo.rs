//! Repository for the `user_url_limits` table.

use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::url_limit::UrlLimit;

/// Column list for `user_url_limits` queries.
const COLUMNS: &str = "customer_id, additional_urls, updated_at";

/// Provides data access for per-account URL quota overrides.
pub struct UrlLimitRepo;

impl UrlLimitRepo {
    /// Extra URL slots granted to a customer; zero when no override exists.
    pub async fn additional_urls(pool: &PgPool, customer_id: DbId) -> Result<i32, sqlx::Error> {
        let extra: Option<i32> = sqlx::query_scalar(
            "SELECT additional_urls FROM user_url_limits WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
        Ok(extra.unwrap_or(0))
    }

    /// Set (or create) the override record for a customer.
    pub async fn set(
        pool: &PgPool,
        customer_id: DbId,
        additional_urls: i32,
    ) -> Result<UrlLimit, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_url_limits (customer_id, additional_urls) \
             VALUES ($1, $2) \
             ON CONFLICT (customer_id) DO UPDATE SET \
                 additional_urls = EXCLUDED.additional_urls, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UrlLimit>(&query)
            .bind(customer_id)
            .bind(additional_urls)
            .fetch_one(pool)
            .await
    }
}
