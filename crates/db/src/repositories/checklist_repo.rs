//! Repository for the `customer_checklist_progress` table.

use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::checklist::ChecklistProgress;

/// Column list for `customer_checklist_progress` queries.
const COLUMNS: &str = "id, customer_id, guide_slug, completed_at";

/// Provides data access for completed removal guides.
pub struct ChecklistRepo;

impl ChecklistRepo {
    /// Mark a guide completed. Idempotent: completing the same guide twice
    /// keeps the original completion row and timestamp.
    pub async fn complete(
        pool: &PgPool,
        customer_id: DbId,
        guide_slug: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO customer_checklist_progress (customer_id, guide_slug) \
             VALUES ($1, $2) \
             ON CONFLICT (customer_id, guide_slug) DO NOTHING",
        )
        .bind(customer_id)
        .bind(guide_slug)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List a customer's completion rows, oldest-first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<ChecklistProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_checklist_progress \
             WHERE customer_id = $1 ORDER BY completed_at ASC"
        );
        sqlx::query_as::<_, ChecklistProgress>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Slugs of every guide the customer has completed.
    pub async fn completed_slugs(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT guide_slug FROM customer_checklist_progress WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }
}
