//! Integration tests for the change-event audit trail.

use skydd_db::models::customer::CreateCustomer;
use skydd_db::repositories::{CustomerRepo, EventRepo};
use sqlx::PgPool;

async fn seed_customer(pool: &PgPool) -> i64 {
    CustomerRepo::insert(
        pool,
        &CreateCustomer {
            display_name: "Anna Andersson".to_string(),
            email: "events@example.com".to_string(),
            subscription_plan: "6_months".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn inserted_events_list_newest_first(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let first = EventRepo::insert(
        &pool,
        "removal_urls",
        "insert",
        customer_id,
        None,
        Some(1),
        &serde_json::json!({ "url": "https://example.com/anna" }),
    )
    .await
    .unwrap();
    let second = EventRepo::insert(
        &pool,
        "removal_urls",
        "update",
        customer_id,
        None,
        Some(1),
        &serde_json::json!({ "status": "case_started" }),
    )
    .await
    .unwrap();
    assert!(second > first);

    let recent = EventRepo::list_recent(&pool, 10, 0).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second);
    assert_eq!(recent[0].op, "update");
    assert_eq!(recent[1].table_name, "removal_urls");
    assert_eq!(recent[1].payload["url"], "https://example.com/anna");
}

#[sqlx::test(migrations = "./migrations")]
async fn retention_cutoff_spares_recent_events(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    EventRepo::insert(
        &pool,
        "customers",
        "update",
        customer_id,
        None,
        Some(customer_id),
        &serde_json::json!({}),
    )
    .await
    .unwrap();

    // A cutoff in the past deletes nothing.
    let old_cutoff = chrono::Utc::now() - chrono::Duration::days(90);
    assert_eq!(EventRepo::delete_older_than(&pool, old_cutoff).await.unwrap(), 0);
    assert_eq!(EventRepo::list_recent(&pool, 10, 0).await.unwrap().len(), 1);

    // A future cutoff sweeps everything.
    let future_cutoff = chrono::Utc::now() + chrono::Duration::days(1);
    assert_eq!(
        EventRepo::delete_older_than(&pool, future_cutoff).await.unwrap(),
        1
    );
    assert!(EventRepo::list_recent(&pool, 10, 0).await.unwrap().is_empty());
}
