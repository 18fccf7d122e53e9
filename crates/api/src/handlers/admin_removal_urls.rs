//! Admin moderation handlers for the removal-URL pipeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use skydd_core::error::CoreError;
use skydd_core::status::RemovalStatus;
use skydd_core::types::DbId;
use skydd_db::repositories::{CustomerRepo, RemovalUrlRepo};
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /admin/customers/{id}/removal-urls
// ---------------------------------------------------------------------------

/// Every removal URL for one customer, incoming or not.
pub async fn list_for_customer(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CustomerRepo::get(&state.pool, id).await?;
    let rows = RemovalUrlRepo::list_all(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// PATCH /admin/removal-urls/{id}/status
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AdvanceStatus {
    pub status: String,
}

/// Advance a removal URL through the pipeline.
///
/// The status string is parsed strictly (unknown input is a validation
/// error, unlike the fail-open display mapping). Status history is
/// append-only and strictly monotonic: a transition that does not advance
/// the pipeline is rejected with 409 Conflict.
pub async fn advance_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdvanceStatus>,
) -> AppResult<impl IntoResponse> {
    let next = RemovalStatus::parse(&input.status)?;

    let row = RemovalUrlRepo::get(&state.pool, id).await?;
    let current = RemovalStatus::parse(&row.current_status).map_err(|_| {
        CoreError::Internal(format!(
            "Removal URL {id} has unknown stored status '{}'",
            row.current_status
        ))
    })?;

    if !current.can_advance_to(next) {
        return Err(CoreError::Conflict(format!(
            "Cannot move removal URL {id} from '{}' to '{}': status must advance",
            current.as_str(),
            next.as_str()
        ))
        .into());
    }

    // The UPDATE re-checks the current status, so a racing advance that
    // committed after our read loses here instead of slipping into history.
    let updated = RemovalUrlRepo::advance_status(&state.pool, id, current, next)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(format!(
                "Removal URL {id} was updated concurrently; no longer at '{}'",
                current.as_str()
            ))
        })?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::RemovalUrls, ChangeOp::Update, updated.customer_id)
            .with_entity(updated.id)
            .with_payload(serde_json::json!({ "status": next.as_str() })),
    );
    tracing::info!(
        admin_id = admin.user_id,
        removal_url_id = id,
        from = current.as_str(),
        to = next.as_str(),
        "Removal URL status advanced"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/removal-urls/{id}
// ---------------------------------------------------------------------------

/// Explicit admin cleanup; the only way a removal URL is ever deleted.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // Fetch first: the Delete event needs the owning customer id.
    let row = RemovalUrlRepo::get(&state.pool, id).await?;
    RemovalUrlRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::RemovalUrls, ChangeOp::Delete, row.customer_id)
            .with_entity(row.id),
    );
    tracing::info!(
        admin_id = admin.user_id,
        removal_url_id = id,
        customer_id = row.customer_id,
        "Removal URL deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
