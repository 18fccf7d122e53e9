//! Admin-dashboard handlers for customer management: accounts,
//! subscriptions, quota overrides, and site-status moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use skydd_core::error::CoreError;
use skydd_core::score::SubscriptionPlan;
use skydd_core::site::SiteVisibility;
use skydd_core::types::DbId;
use skydd_db::models::customer::{CreateCustomer, UpdateCustomer};
use skydd_db::models::site_status::UpsertSiteStatus;
use skydd_db::repositories::{CustomerRepo, MemberRepo, SiteStatusRepo, UrlLimitRepo};
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /admin/customers
// ---------------------------------------------------------------------------

/// Create a customer account. Activation email delivery is handled by the
/// messaging service, not here.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    if input.display_name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(CoreError::Validation("Name and email are required".into()).into());
    }
    SubscriptionPlan::parse(&input.subscription_plan)?;

    let customer = CustomerRepo::insert(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        customer_id = customer.id,
        "Customer created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

// ---------------------------------------------------------------------------
// GET /admin/customers
// ---------------------------------------------------------------------------

/// Paginated customer listing for the dashboard.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit();
    let offset = params.offset();
    let items = CustomerRepo::list(&state.pool, limit, offset).await?;
    let total = CustomerRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            limit,
            offset,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /admin/customers/{id}
// ---------------------------------------------------------------------------

pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::get(&state.pool, id).await?;
    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// PATCH /admin/customers/{id}
// ---------------------------------------------------------------------------

/// Partial update of name, email, or subscription plan.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref plan) = input.subscription_plan {
        SubscriptionPlan::parse(plan)?;
    }

    let customer = CustomerRepo::update(&state.pool, id, &input).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Customers, ChangeOp::Update, id).with_entity(id),
    );
    tracing::info!(admin_id = admin.user_id, customer_id = id, "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/customers/{id}
// ---------------------------------------------------------------------------

/// Delete a customer and everything owned by the account.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "customer",
            id,
        }
        .into());
    }

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Customers, ChangeOp::Delete, id).with_entity(id),
    );
    tracing::info!(admin_id = admin.user_id, customer_id = id, "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PUT /admin/customers/{id}/url-limit
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SetUrlLimit {
    pub additional_urls: i32,
}

/// Grant (or revoke) extra URL slots on top of the default quota.
pub async fn set_url_limit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetUrlLimit>,
) -> AppResult<impl IntoResponse> {
    if input.additional_urls < 0 {
        return Err(CoreError::Validation("additional_urls must not be negative".into()).into());
    }
    // 404 before writing an orphan override row.
    CustomerRepo::get(&state.pool, id).await?;

    let limit = UrlLimitRepo::set(&state.pool, id, input.additional_urls).await?;
    tracing::info!(
        admin_id = admin.user_id,
        customer_id = id,
        additional_urls = input.additional_urls,
        "URL limit override set"
    );

    Ok(Json(DataResponse { data: limit }))
}

// ---------------------------------------------------------------------------
// PUT /admin/customers/{id}/site-statuses
// ---------------------------------------------------------------------------

/// Admin upsert of one site-status row, optionally member-scoped.
pub async fn upsert_site_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertSiteStatus>,
) -> AppResult<impl IntoResponse> {
    SiteVisibility::parse(&input.status)?;
    CustomerRepo::get(&state.pool, id).await?;
    if let Some(member_id) = input.member_id {
        let member = MemberRepo::get(&state.pool, member_id).await?;
        if member.customer_id != id {
            return Err(CoreError::Validation(format!(
                "Member {member_id} does not belong to customer {id}"
            ))
            .into());
        }
    }

    let row = SiteStatusRepo::upsert(
        &state.pool,
        id,
        input.member_id,
        &input.site_name,
        &input.status,
    )
    .await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::SiteStatuses, ChangeOp::Update, id)
            .with_member(input.member_id)
            .with_entity(row.id)
            .with_payload(serde_json::json!({
                "site_name": row.site_name,
                "status": row.status,
            })),
    );
    tracing::info!(
        admin_id = admin.user_id,
        customer_id = id,
        site = %row.site_name,
        status = %row.status,
        "Site status upserted"
    );

    Ok(Json(DataResponse { data: row }))
}
