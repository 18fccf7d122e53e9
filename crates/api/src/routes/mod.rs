pub mod health;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                       realtime change feed (WebSocket)
///
/// /me                                       profile (GET)
/// /me/address                               address alert (PUT, DELETE)
/// /score                                    privacy score (GET)
///
/// /removal-urls                             incoming list (GET), submit batch (POST)
/// /removal-urls/quota                       quota readout (GET)
///
/// /site-statuses                            list for person (GET)
/// /site-statuses/{site}/remove              self-service removal (POST)
///
/// /guides                                   catalog with completion (GET)
/// /guides/{slug}/complete                   mark completed (POST)
///
/// /onboarding                               checklist state (GET)
/// /onboarding/{step}/complete               mark step done (POST)
///
/// /members                                  list (GET), add (POST)
/// /members/{id}                             remove (DELETE)
///
/// /admin/customers                          list (GET), create (POST)       [admin]
/// /admin/customers/{id}                     get, update, delete             [admin]
/// /admin/customers/{id}/url-limit           quota override (PUT)            [admin]
/// /admin/customers/{id}/site-statuses       status upsert (PUT)             [admin]
/// /admin/customers/{id}/removal-urls        moderation list (GET)           [admin]
/// /admin/removal-urls/{id}/status           advance pipeline (PATCH)        [admin]
/// /admin/removal-urls/{id}                  cleanup (DELETE)                [admin]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        // -- Customer-facing --
        .route("/me", get(handlers::profile::get_me))
        .route(
            "/me/address",
            put(handlers::profile::put_address).delete(handlers::profile::delete_address),
        )
        .route("/score", get(handlers::score::get_score))
        .route(
            "/removal-urls",
            get(handlers::removal_urls::list_incoming).post(handlers::removal_urls::submit),
        )
        .route("/removal-urls/quota", get(handlers::removal_urls::quota))
        .route("/site-statuses", get(handlers::site_statuses::list))
        .route(
            "/site-statuses/{site}/remove",
            post(handlers::site_statuses::self_service_remove),
        )
        .route("/guides", get(handlers::guides::list))
        .route("/guides/{slug}/complete", post(handlers::guides::complete))
        .route("/onboarding", get(handlers::onboarding::get))
        .route(
            "/onboarding/{step}/complete",
            post(handlers::onboarding::complete_step),
        )
        .route(
            "/members",
            get(handlers::members::list).post(handlers::members::create),
        )
        .route("/members/{id}", axum::routing::delete(handlers::members::delete))
        // -- Admin dashboard --
        .route(
            "/admin/customers",
            get(handlers::admin_customers::list).post(handlers::admin_customers::create),
        )
        .route(
            "/admin/customers/{id}",
            get(handlers::admin_customers::get)
                .patch(handlers::admin_customers::update)
                .delete(handlers::admin_customers::delete),
        )
        .route(
            "/admin/customers/{id}/url-limit",
            put(handlers::admin_customers::set_url_limit),
        )
        .route(
            "/admin/customers/{id}/site-statuses",
            put(handlers::admin_customers::upsert_site_status),
        )
        .route(
            "/admin/customers/{id}/removal-urls",
            get(handlers::admin_removal_urls::list_for_customer),
        )
        .route(
            "/admin/removal-urls/{id}/status",
            patch(handlers::admin_removal_urls::advance_status),
        )
        .route(
            "/admin/removal-urls/{id}",
            axum::routing::delete(handlers::admin_removal_urls::delete),
        )
}
