//! Integration tests for site-status upserts and guide completion.

use skydd_db::models::customer::CreateCustomer;
use skydd_db::models::member::CreateMember;
use skydd_db::repositories::{ChecklistRepo, CustomerRepo, MemberRepo, SiteStatusRepo};
use sqlx::PgPool;

async fn seed_customer(pool: &PgPool) -> i64 {
    CustomerRepo::insert(
        pool,
        &CreateCustomer {
            display_name: "Anna Andersson".to_string(),
            email: "sites@example.com".to_string(),
            subscription_plan: "6_months".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn upsert_replaces_status_per_tuple(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let first = SiteStatusRepo::upsert(&pool, customer_id, None, "mrkoll", "Granskar")
        .await
        .unwrap();
    let second = SiteStatusRepo::upsert(&pool, customer_id, None, "mrkoll", "Borttagen")
        .await
        .unwrap();

    // Same row updated, not a second row inserted.
    assert_eq!(first.id, second.id);
    assert_eq!(second.status, "Borttagen");

    let rows = SiteStatusRepo::list_for_person(&pool, customer_id, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn primary_holder_and_member_rows_are_distinct(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let member = MemberRepo::insert(
        &pool,
        customer_id,
        &CreateMember {
            display_name: "Erik".to_string(),
            relationship: "child".to_string(),
        },
    )
    .await
    .unwrap();

    SiteStatusRepo::upsert(&pool, customer_id, None, "ratsit", "Synlig")
        .await
        .unwrap();
    SiteStatusRepo::upsert(&pool, customer_id, Some(member.id), "ratsit", "Adress dold")
        .await
        .unwrap();

    let primary = SiteStatusRepo::list_for_person(&pool, customer_id, None)
        .await
        .unwrap();
    let member_rows = SiteStatusRepo::list_for_person(&pool, customer_id, Some(member.id))
        .await
        .unwrap();

    assert_eq!(primary.len(), 1);
    assert_eq!(primary[0].status, "Synlig");
    assert_eq!(member_rows.len(), 1);
    assert_eq!(member_rows[0].status, "Adress dold");
}

#[sqlx::test(migrations = "./migrations")]
async fn guide_completion_is_idempotent(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    ChecklistRepo::complete(&pool, customer_id, "mrkoll").await.unwrap();
    let first = ChecklistRepo::list_for_customer(&pool, customer_id)
        .await
        .unwrap();

    // Completing again keeps the original row and timestamp.
    ChecklistRepo::complete(&pool, customer_id, "mrkoll").await.unwrap();
    let second = ChecklistRepo::list_for_customer(&pool, customer_id)
        .await
        .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].completed_at, second[0].completed_at);

    ChecklistRepo::complete(&pool, customer_id, "hitta").await.unwrap();
    let mut slugs = ChecklistRepo::completed_slugs(&pool, customer_id)
        .await
        .unwrap();
    slugs.sort();
    assert_eq!(slugs, vec!["hitta".to_string(), "mrkoll".to_string()]);
}
