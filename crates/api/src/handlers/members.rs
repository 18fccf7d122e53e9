//! Handlers for family members covered under one subscription.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use skydd_core::error::CoreError;
use skydd_core::types::DbId;
use skydd_db::models::member::CreateMember;
use skydd_db::repositories::MemberRepo;
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::handlers::site_statuses::ensure_member_of;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /members
// ---------------------------------------------------------------------------

/// List the caller's family members.
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let members = MemberRepo::list_for_customer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: members }))
}

// ---------------------------------------------------------------------------
// POST /members
// ---------------------------------------------------------------------------

/// Add a family member to the subscription.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<impl IntoResponse> {
    if input.display_name.trim().is_empty() {
        return Err(CoreError::Validation("Member name must not be empty".into()).into());
    }

    let member = MemberRepo::insert(&state.pool, auth.user_id, &input).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Members, ChangeOp::Insert, auth.user_id)
            .with_member(Some(member.id))
            .with_entity(member.id),
    );
    tracing::info!(customer_id = auth.user_id, member_id = member.id, "Member added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

// ---------------------------------------------------------------------------
// DELETE /members/{id}
// ---------------------------------------------------------------------------

/// Remove a family member. Their site statuses cascade away with the row.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member_of(&state, auth.user_id, id).await?;

    MemberRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Members, ChangeOp::Delete, auth.user_id)
            .with_member(Some(id))
            .with_entity(id),
    );
    tracing::info!(customer_id = auth.user_id, member_id = id, "Member removed");

    Ok(StatusCode::NO_CONTENT)
}
