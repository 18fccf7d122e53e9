//! Repository for the `customer_site_statuses` table.

use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::site_status::SiteStatus;

/// Column list for `customer_site_statuses` queries.
const COLUMNS: &str = "\
    id, customer_id, member_id, site_name, status, created_at, updated_at";

/// Provides data access for per-site visibility statuses.
pub struct SiteStatusRepo;

impl SiteStatusRepo {
    /// List statuses for one person: the primary holder when `member_id`
    /// is `None`, otherwise the given family member.
    pub async fn list_for_person(
        pool: &PgPool,
        customer_id: DbId,
        member_id: Option<DbId>,
    ) -> Result<Vec<SiteStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_site_statuses \
             WHERE customer_id = $1 AND member_id IS NOT DISTINCT FROM $2 \
             ORDER BY site_name ASC"
        );
        sqlx::query_as::<_, SiteStatus>(&query)
            .bind(customer_id)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or update the row for a (customer, member, site) tuple.
    ///
    /// Relies on the `uq_customer_site_statuses_tuple` constraint, which
    /// treats NULL member ids as equal so the primary holder upserts too.
    pub async fn upsert(
        pool: &PgPool,
        customer_id: DbId,
        member_id: Option<DbId>,
        site_name: &str,
        status: &str,
    ) -> Result<SiteStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_site_statuses \
                 (customer_id, member_id, site_name, status) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (customer_id, member_id, site_name) DO UPDATE SET \
                 status = EXCLUDED.status, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteStatus>(&query)
            .bind(customer_id)
            .bind(member_id)
            .bind(site_name)
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
