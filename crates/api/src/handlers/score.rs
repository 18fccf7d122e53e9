//! Handler for the privacy-score readout.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use skydd_core::error::CoreError;
use skydd_core::guides;
use skydd_core::score::{calculate_score, ScoreInputs, SubscriptionPlan};
use skydd_core::status::RemovalStatus;
use skydd_db::repositories::{ChecklistRepo, CustomerRepo, RemovalUrlRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /score
// ---------------------------------------------------------------------------

/// Compute the customer's privacy score from live data.
///
/// Nothing is cached or stored; the score is derived on every read from the
/// checklist, the address alert, and the removal-URL counts.
pub async fn get_score(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::get(&state.pool, auth.user_id).await?;

    // A plan string we cannot parse is corrupt account data, not caller error.
    let plan = SubscriptionPlan::parse(&customer.subscription_plan).map_err(|_| {
        CoreError::Internal(format!(
            "Customer {} has unknown subscription plan '{}'",
            customer.id, customer.subscription_plan
        ))
    })?;

    let completed = ChecklistRepo::completed_slugs(&state.pool, auth.user_id).await?;
    let submitted = RemovalUrlRepo::count_for_customer(&state.pool, auth.user_id).await?;
    let approved =
        RemovalUrlRepo::count_by_status(&state.pool, auth.user_id, RemovalStatus::RemovalApproved)
            .await?;

    let breakdown = calculate_score(&ScoreInputs {
        completed_guides: completed.len() as u32,
        total_guides: guides::total_guides(),
        has_street_address: customer.street_address.is_some(),
        urls_submitted: submitted as u32,
        urls_approved: approved as u32,
        plan,
    });

    Ok(Json(DataResponse { data: breakdown }))
}
