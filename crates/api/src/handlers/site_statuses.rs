//! Handlers for per-site visibility statuses.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use skydd_core::error::CoreError;
use skydd_core::guides;
use skydd_core::site::SiteVisibility;
use skydd_core::types::DbId;
use skydd_db::repositories::{MemberRepo, SiteStatusRepo};
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::MemberParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /site-statuses
// ---------------------------------------------------------------------------

/// List site statuses for the primary holder, or for one family member
/// when `?member_id=` is given.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MemberParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(member_id) = params.member_id {
        ensure_member_of(&state, auth.user_id, member_id).await?;
    }

    let rows =
        SiteStatusRepo::list_for_person(&state.pool, auth.user_id, params.member_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// POST /site-statuses/{site}/remove
// ---------------------------------------------------------------------------

/// Self-service removal request for one covered site.
///
/// Puts the row under review (`Granskar`) rather than marking it removed:
/// staff confirm the actual takedown and advance the status afterwards.
pub async fn self_service_remove(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(site): Path<String>,
    Query(params): Query<MemberParams>,
) -> AppResult<impl IntoResponse> {
    guides::validate_guide_slug(&site)?;
    if let Some(member_id) = params.member_id {
        ensure_member_of(&state, auth.user_id, member_id).await?;
    }

    let row = SiteStatusRepo::upsert(
        &state.pool,
        auth.user_id,
        params.member_id,
        &site,
        SiteVisibility::Granskar.as_str(),
    )
    .await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::SiteStatuses, ChangeOp::Update, auth.user_id)
            .with_member(params.member_id)
            .with_entity(row.id)
            .with_payload(serde_json::json!({ "site_name": site })),
    );
    tracing::info!(
        customer_id = auth.user_id,
        member_id = params.member_id,
        site = %site,
        "Self-service removal requested"
    );

    Ok(Json(DataResponse { data: row }))
}

/// Verify a member id belongs to the calling customer.
pub(crate) async fn ensure_member_of(
    state: &AppState,
    customer_id: DbId,
    member_id: DbId,
) -> AppResult<()> {
    let member = match MemberRepo::get(&state.pool, member_id).await {
        Ok(member) => member,
        Err(sqlx::Error::RowNotFound) => {
            return Err(CoreError::NotFound {
                entity: "member",
                id: member_id,
            }
            .into())
        }
        Err(e) => return Err(e.into()),
    };
    if member.customer_id != customer_id {
        // Do not reveal that the id exists under another account.
        return Err(CoreError::NotFound {
            entity: "member",
            id: member_id,
        }
        .into());
    }
    Ok(())
}
