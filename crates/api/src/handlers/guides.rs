//! Handlers for the removal-guide catalog and per-customer completion.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use skydd_core::guides;
use skydd_db::repositories::ChecklistRepo;
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One catalog guide with the caller's completion flag.
#[derive(Debug, Serialize)]
pub struct GuideView {
    pub slug: &'static str,
    pub title: &'static str,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// GET /guides
// ---------------------------------------------------------------------------

/// The guide catalog with per-customer completion flags.
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let completed = ChecklistRepo::completed_slugs(&state.pool, auth.user_id).await?;

    let views: Vec<GuideView> = guides::GUIDES
        .iter()
        .map(|g| GuideView {
            slug: g.slug,
            title: g.title,
            completed: completed.iter().any(|slug| slug == g.slug),
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// POST /guides/{slug}/complete
// ---------------------------------------------------------------------------

/// Mark a guide completed. Idempotent; repeat completions do not move the
/// original completion timestamp.
pub async fn complete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    guides::validate_guide_slug(&slug)?;

    ChecklistRepo::complete(&state.pool, auth.user_id, &slug).await?;

    state.event_bus.publish(
        ChangeEvent::new(ChangeTable::ChecklistProgress, ChangeOp::Insert, auth.user_id)
            .with_payload(serde_json::json!({ "guide_slug": slug })),
    );
    tracing::info!(customer_id = auth.user_id, guide = %slug, "Guide completed");

    let progress = ChecklistRepo::list_for_customer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: progress }))
}
