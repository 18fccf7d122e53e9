//! Repository for the `removal_urls` table.

use skydd_core::status::RemovalStatus;
use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::removal_url::{RemovalUrl, StatusHistoryEntry};

/// Column list for `removal_urls` queries.
const COLUMNS: &str = "\
    id, customer_id, url, current_status, status_history, \
    is_incoming, created_at, updated_at";

/// Provides data access for tracked removal URLs.
pub struct RemovalUrlRepo;

impl RemovalUrlRepo {
    /// Fetch one removal URL by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<RemovalUrl, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM removal_urls WHERE id = $1");
        sqlx::query_as::<_, RemovalUrl>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert one submitted URL with the initial `received` status and a
    /// single-entry history, visible in the incoming view.
    pub async fn insert(
        pool: &PgPool,
        customer_id: DbId,
        url: &str,
    ) -> Result<RemovalUrl, sqlx::Error> {
        let initial = RemovalStatus::Received.as_str();
        let history = serde_json::json!([StatusHistoryEntry::now(initial)]);
        let query = format!(
            "INSERT INTO removal_urls \
                 (customer_id, url, current_status, status_history, is_incoming) \
             VALUES ($1, $2, $3, $4, TRUE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RemovalUrl>(&query)
            .bind(customer_id)
            .bind(url)
            .bind(initial)
            .bind(&history)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of submitted URLs in one transaction, so a failure
    /// partway through persists nothing. Rows come back in submission order.
    pub async fn insert_batch(
        pool: &PgPool,
        customer_id: DbId,
        urls: &[String],
    ) -> Result<Vec<RemovalUrl>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let initial = RemovalStatus::Received.as_str();
        let query = format!(
            "INSERT INTO removal_urls \
                 (customer_id, url, current_status, status_history, is_incoming) \
             VALUES ($1, $2, $3, $4, TRUE) \
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(urls.len());
        for url in urls {
            let history = serde_json::json!([StatusHistoryEntry::now(initial)]);
            let row = sqlx::query_as::<_, RemovalUrl>(&query)
                .bind(customer_id)
                .bind(url)
                .bind(initial)
                .bind(&history)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// List a customer's incoming removal URLs, oldest-first.
    pub async fn list_incoming(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<RemovalUrl>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM removal_urls \
             WHERE customer_id = $1 AND is_incoming \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, RemovalUrl>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// List every removal URL for a customer (admin moderation view).
    pub async fn list_all(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<RemovalUrl>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM removal_urls WHERE customer_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, RemovalUrl>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Number of stored URLs for a customer (the quota numerator).
    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM removal_urls WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// Number of a customer's URLs currently in the given status.
    pub async fn count_by_status(
        pool: &PgPool,
        customer_id: DbId,
        status: RemovalStatus,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM removal_urls WHERE customer_id = $1 AND current_status = $2",
        )
        .bind(customer_id)
        .bind(status.as_str())
        .fetch_one(pool)
        .await
    }

    /// Set a new status and append the matching history entry in one
    /// UPDATE, guarded on the expected current status. Returns `None` when
    /// the row no longer holds `from` (a concurrent update won), so the
    /// history append stays in lockstep with `current_status` even under
    /// racing callers. Which transitions are legal is the caller's call.
    pub async fn advance_status(
        pool: &PgPool,
        id: DbId,
        from: RemovalStatus,
        to: RemovalStatus,
    ) -> Result<Option<RemovalUrl>, sqlx::Error> {
        let entry = serde_json::json!(StatusHistoryEntry::now(to.as_str()));
        let query = format!(
            "UPDATE removal_urls SET \
                 current_status = $2, \
                 status_history = status_history || jsonb_build_array($3::jsonb), \
                 updated_at = NOW() \
             WHERE id = $1 AND current_status = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RemovalUrl>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(&entry)
            .bind(from.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Explicit admin cleanup. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM removal_urls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
