//! Integration tests for the removal-URL pipeline at the repository layer:
//! seeded history on insert, lockstep history appends, status counts, and
//! the documented quota gap (no database-level enforcement).

use skydd_core::quota::UrlQuota;
use skydd_core::status::RemovalStatus;
use skydd_db::models::customer::CreateCustomer;
use skydd_db::repositories::{CustomerRepo, RemovalUrlRepo};
use sqlx::PgPool;

async fn seed_customer(pool: &PgPool) -> i64 {
    CustomerRepo::insert(
        pool,
        &CreateCustomer {
            display_name: "Anna Andersson".to_string(),
            email: "urls@example.com".to_string(),
            subscription_plan: "12_months".to_string(),
        },
    )
    .await
    .expect("customer insert should succeed")
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_seeds_received_status_and_history(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let row = RemovalUrlRepo::insert(&pool, customer_id, "https://example.com/anna")
        .await
        .unwrap();

    assert_eq!(row.current_status, "received");
    assert!(row.is_incoming);

    let history = row.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "received");
}

#[sqlx::test(migrations = "./migrations")]
async fn advance_appends_history_in_lockstep(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let row = RemovalUrlRepo::insert(&pool, customer_id, "https://example.com/anna")
        .await
        .unwrap();

    let advanced = RemovalUrlRepo::advance_status(
        &pool,
        row.id,
        RemovalStatus::Received,
        RemovalStatus::CaseStarted,
    )
    .await
    .unwrap()
    .expect("row is at 'received'");
    let approved = RemovalUrlRepo::advance_status(
        &pool,
        advanced.id,
        RemovalStatus::CaseStarted,
        RemovalStatus::RemovalApproved,
    )
    .await
    .unwrap()
    .expect("row is at 'case_started'");

    assert_eq!(approved.current_status, "removal_approved");
    let history = approved.history();
    let statuses: Vec<&str> = history.iter().map(|e| e.status.as_str()).collect();
    assert_eq!(statuses, vec!["received", "case_started", "removal_approved"]);
    // History timestamps are non-decreasing.
    assert!(history.windows(2).all(|w| w[0].at <= w[1].at));
}

/// The advance UPDATE is a compare-and-swap on `current_status`. A caller
/// holding a stale view of the row gets `None` instead of appending an
/// out-of-order history entry, so two racing advances cannot both land.
#[sqlx::test(migrations = "./migrations")]
async fn advance_with_stale_expected_status_is_rejected(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let row = RemovalUrlRepo::insert(&pool, customer_id, "https://example.com/anna")
        .await
        .unwrap();

    // First writer wins the swap away from 'received'.
    RemovalUrlRepo::advance_status(
        &pool,
        row.id,
        RemovalStatus::Received,
        RemovalStatus::RemovalApproved,
    )
    .await
    .unwrap()
    .expect("row is at 'received'");

    // Second writer still expects 'received' and must lose.
    let stale = RemovalUrlRepo::advance_status(
        &pool,
        row.id,
        RemovalStatus::Received,
        RemovalStatus::CaseStarted,
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let current = RemovalUrlRepo::get(&pool, row.id).await.unwrap();
    assert_eq!(current.current_status, "removal_approved");
    let history = current.history();
    let statuses: Vec<&str> = history.iter().map(|e| e.status.as_str()).collect();
    assert_eq!(statuses, vec!["received", "removal_approved"]);
}

/// Batch submission is all-or-nothing: a failing row rolls back the rows
/// inserted before it (Postgres rejects NUL bytes in text, which makes a
/// handy mid-batch failure).
#[sqlx::test(migrations = "./migrations")]
async fn insert_batch_rolls_back_on_mid_batch_failure(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let batch = vec![
        "https://example.com/ok".to_string(),
        "https://example.com/bad\0".to_string(),
    ];
    RemovalUrlRepo::insert_batch(&pool, customer_id, &batch)
        .await
        .expect_err("NUL byte should fail the second insert");

    assert_eq!(
        RemovalUrlRepo::count_for_customer(&pool, customer_id).await.unwrap(),
        0
    );

    let ok = RemovalUrlRepo::insert_batch(
        &pool,
        customer_id,
        &["https://a.example/1".to_string(), "https://b.example/2".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(ok.len(), 2);
    assert_eq!(ok[0].url, "https://a.example/1");
    assert_eq!(
        RemovalUrlRepo::count_for_customer(&pool, customer_id).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn status_counts_feed_the_score(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let a = RemovalUrlRepo::insert(&pool, customer_id, "https://a.example/1")
        .await
        .unwrap();
    RemovalUrlRepo::insert(&pool, customer_id, "https://b.example/2")
        .await
        .unwrap();
    RemovalUrlRepo::advance_status(
        &pool,
        a.id,
        RemovalStatus::Received,
        RemovalStatus::RemovalApproved,
    )
    .await
    .unwrap()
    .expect("row is at 'received'");

    assert_eq!(
        RemovalUrlRepo::count_for_customer(&pool, customer_id).await.unwrap(),
        2
    );
    assert_eq!(
        RemovalUrlRepo::count_by_status(&pool, customer_id, RemovalStatus::RemovalApproved)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        RemovalUrlRepo::count_by_status(&pool, customer_id, RemovalStatus::Received)
            .await
            .unwrap(),
        1
    );
}

/// The quota is checked read-then-write at the service layer only. A direct
/// repository insert past the limit succeeds; this test pins down that the
/// gap is in the database by design, not an accident of the service code.
#[sqlx::test(migrations = "./migrations")]
async fn direct_insert_bypasses_the_quota(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quota = UrlQuota::default();

    for i in 0..quota.limit() {
        RemovalUrlRepo::insert(&pool, customer_id, &format!("https://example.com/{i}"))
            .await
            .unwrap();
    }

    let used = RemovalUrlRepo::count_for_customer(&pool, customer_id).await.unwrap() as u32;
    assert!(!quota.allows(used, 1), "service-layer check would reject a 4th URL");

    // ...but nothing in the schema does.
    let fourth = RemovalUrlRepo::insert(&pool, customer_id, "https://example.com/over")
        .await
        .expect("direct insert past the quota is not blocked");
    assert_eq!(fourth.current_status, "received");
    assert_eq!(
        RemovalUrlRepo::count_for_customer(&pool, customer_id).await.unwrap(),
        4
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_cleanup_deletes_the_row(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let row = RemovalUrlRepo::insert(&pool, customer_id, "https://example.com/anna")
        .await
        .unwrap();

    assert!(RemovalUrlRepo::delete(&pool, row.id).await.unwrap());
    assert!(!RemovalUrlRepo::delete(&pool, row.id).await.unwrap());
    assert!(matches!(
        RemovalUrlRepo::get(&pool, row.id).await,
        Err(sqlx::Error::RowNotFound)
    ));
}
