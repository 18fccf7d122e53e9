//! Repository for the `customer_members` table.

use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{CreateMember, CustomerMember};

/// Column list for `customer_members` queries.
const COLUMNS: &str = "id, customer_id, display_name, relationship, created_at";

/// Provides data access for family members on a subscription.
pub struct MemberRepo;

impl MemberRepo {
    /// Fetch one member by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<CustomerMember, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customer_members WHERE id = $1");
        sqlx::query_as::<_, CustomerMember>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List a customer's members, oldest-first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<CustomerMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_members \
             WHERE customer_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, CustomerMember>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Add a member to a subscription.
    pub async fn insert(
        pool: &PgPool,
        customer_id: DbId,
        dto: &CreateMember,
    ) -> Result<CustomerMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_members (customer_id, display_name, relationship) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerMember>(&query)
            .bind(customer_id)
            .bind(&dto.display_name)
            .bind(&dto.relationship)
            .fetch_one(pool)
            .await
    }

    /// Remove a member. Their site statuses cascade via foreign key.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
