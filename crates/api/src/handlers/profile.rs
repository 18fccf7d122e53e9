//! Handlers for the authenticated customer's own profile, including the
//! address alert that feeds the privacy score.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use skydd_core::error::CoreError;
use skydd_db::repositories::CustomerRepo;
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /me
// ---------------------------------------------------------------------------

/// The customer's profile: plan, address alert, onboarding state.
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::get(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// PUT /me/address
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SetAddress {
    pub street_address: String,
}

/// Register (or replace) the street address for address alerts.
pub async fn put_address(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SetAddress>,
) -> AppResult<impl IntoResponse> {
    let address = input.street_address.trim();
    if address.is_empty() {
        return Err(CoreError::Validation("Street address must not be empty".into()).into());
    }

    let customer = CustomerRepo::set_street_address(&state.pool, auth.user_id, Some(address)).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Customers, ChangeOp::Update, auth.user_id)
            .with_entity(auth.user_id),
    );
    tracing::info!(customer_id = auth.user_id, "Address alert registered");

    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// DELETE /me/address
// ---------------------------------------------------------------------------

/// Clear the address alert.
pub async fn delete_address(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::set_street_address(&state.pool, auth.user_id, None).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Customers, ChangeOp::Update, auth.user_id)
            .with_entity(auth.user_id),
    );
    tracing::info!(customer_id = auth.user_id, "Address alert cleared");

    Ok(Json(DataResponse { data: customer }))
}
