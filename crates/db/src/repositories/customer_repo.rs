//! Repository for the `customers` table.

use skydd_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "\
    id, display_name, email, subscription_plan, street_address, \
    onboarding, created_at, updated_at";

/// Provides data access for customer accounts.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Fetch a customer by id. Errors with `RowNotFound` if absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Customer, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List customers newest-first, paginated.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of customers, for pagination metadata.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await
    }

    /// Create a customer account.
    pub async fn insert(pool: &PgPool, dto: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (display_name, email, subscription_plan) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&dto.display_name)
            .bind(&dto.email)
            .bind(&dto.subscription_plan)
            .fetch_one(pool)
            .await
    }

    /// Partially update a customer. Absent fields keep their values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET \
                 display_name = COALESCE($2, display_name), \
                 email = COALESCE($3, email), \
                 subscription_plan = COALESCE($4, subscription_plan), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&dto.display_name)
            .bind(&dto.email)
            .bind(&dto.subscription_plan)
            .fetch_one(pool)
            .await
    }

    /// Register or clear the street address (the address alert).
    pub async fn set_street_address(
        pool: &PgPool,
        id: DbId,
        street_address: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET street_address = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(street_address)
            .fetch_one(pool)
            .await
    }

    /// Mark one onboarding step completed in the JSONB progress object.
    pub async fn complete_onboarding_step(
        pool: &PgPool,
        id: DbId,
        step: &str,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET \
                 onboarding = onboarding || jsonb_build_object($2::text, TRUE), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(step)
            .fetch_one(pool)
            .await
    }

    /// Delete a customer. Members, removal URLs, site statuses, checklist
    /// progress, and URL limits cascade via foreign keys.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
