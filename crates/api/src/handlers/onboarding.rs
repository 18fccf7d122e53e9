//! Handlers for the four-step onboarding checklist gating account setup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use skydd_core::checklist;
use skydd_db::repositories::CustomerRepo;
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Onboarding state: the fixed step order plus the caller's progress map.
#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub steps: &'static [&'static str],
    pub progress: serde_json::Value,
}

// ---------------------------------------------------------------------------
// GET /onboarding
// ---------------------------------------------------------------------------

/// The caller's onboarding progress.
pub async fn get(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::get(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: OnboardingView {
            steps: checklist::VALID_STEPS,
            progress: customer.onboarding,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/{step}/complete
// ---------------------------------------------------------------------------

/// Mark one onboarding step completed. Unknown steps are a validation error.
pub async fn complete_step(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(step): Path<String>,
) -> AppResult<impl IntoResponse> {
    checklist::validate_step(&step)?;

    let customer =
        CustomerRepo::complete_onboarding_step(&state.pool, auth.user_id, &step).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::Customers, ChangeOp::Update, auth.user_id)
            .with_entity(auth.user_id),
    );
    tracing::info!(customer_id = auth.user_id, step = %step, "Onboarding step completed");

    Ok(Json(DataResponse {
        data: OnboardingView {
            steps: checklist::VALID_STEPS,
            progress: customer.onboarding,
        },
    }))
}
