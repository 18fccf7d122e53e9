//! Handlers for the customer-facing removal-URL pipeline: listing incoming
//! URLs with their display step, batch submission under the quota, and the
//! quota readout the client gates its submit button on.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use skydd_core::error::CoreError;
use skydd_core::quota::{normalize_urls, UrlQuota};
use skydd_core::status::{label, step_index, Locale};
use skydd_core::types::{DbId, Timestamp};
use skydd_db::models::removal_url::{RemovalUrl, StatusHistoryEntry};
use skydd_db::repositories::{RemovalUrlRepo, UrlLimitRepo};
use skydd_events::{ChangeEvent, ChangeOp, ChangeTable};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::LocaleParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A removal URL as the portal renders it: raw status plus the mapped
/// display step and localized label.
#[derive(Debug, Serialize)]
pub struct RemovalUrlView {
    pub id: DbId,
    pub url: String,
    pub current_status: String,
    pub step: u8,
    pub label: &'static str,
    pub status_history: Vec<StatusHistoryEntry>,
    pub created_at: Timestamp,
}

impl RemovalUrlView {
    fn from_row(row: RemovalUrl, locale: Locale) -> Self {
        Self {
            step: step_index(&row.current_status),
            label: label(&row.current_status, locale),
            status_history: row.history(),
            id: row.id,
            url: row.url,
            current_status: row.current_status,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /removal-urls
// ---------------------------------------------------------------------------

/// List the customer's incoming removal URLs with step index and label.
pub async fn list_incoming(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale()?;
    let rows = RemovalUrlRepo::list_incoming(&state.pool, auth.user_id).await?;
    let views: Vec<RemovalUrlView> = rows
        .into_iter()
        .map(|row| RemovalUrlView::from_row(row, locale))
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// POST /removal-urls
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SubmitUrls {
    pub urls: Vec<String>,
}

/// Submit a batch of URLs for removal tracking.
///
/// Blank entries are dropped; an all-blank batch is a validation error.
/// The quota check is read-then-write: two concurrent submissions can both
/// pass it and jointly exceed the quota. Known and accepted; the database
/// does not enforce the limit.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitUrls>,
) -> AppResult<impl IntoResponse> {
    let urls = normalize_urls(&input.urls)?;

    let quota = fetch_quota(&state, auth.user_id).await?;
    let used = RemovalUrlRepo::count_for_customer(&state.pool, auth.user_id).await? as u32;
    if !quota.allows(used, urls.len() as u32) {
        return Err(CoreError::Validation(format!(
            "URL quota exceeded: {used} of {} used, {} requested",
            quota.limit(),
            urls.len()
        ))
        .into());
    }

    // One transaction for the whole batch; events only fire once it commits.
    let rows = RemovalUrlRepo::insert_batch(&state.pool, auth.user_id, &urls).await?;
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        state.event_bus.publish(
            ChangeEvent::new(ChangeTable::RemovalUrls, ChangeOp::Insert, auth.user_id)
                .with_entity(row.id)
                .with_payload(serde_json::json!({ "url": row.url })),
        );
        created.push(RemovalUrlView::from_row(row, Locale::default()));
    }

    tracing::info!(
        customer_id = auth.user_id,
        count = created.len(),
        "Removal URLs submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /removal-urls/quota
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct QuotaView {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

/// The quota readout used by the client to disable its submit button.
pub async fn quota(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let quota = fetch_quota(&state, auth.user_id).await?;
    let used = RemovalUrlRepo::count_for_customer(&state.pool, auth.user_id).await? as u32;

    Ok(Json(DataResponse {
        data: QuotaView {
            used,
            limit: quota.limit(),
            remaining: quota.remaining(used),
        },
    }))
}

/// Effective quota for a customer: default allowance plus any override.
async fn fetch_quota(state: &AppState, customer_id: DbId) -> AppResult<UrlQuota> {
    let additional = UrlLimitRepo::additional_urls(&state.pool, customer_id).await?;
    Ok(UrlQuota::new(additional.max(0) as u32))
}
