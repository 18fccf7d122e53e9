//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the same router (and middleware stack) the binary uses, via
//! `build_app_router`, and drives it with `tower::ServiceExt::oneshot`
//! instead of a TCP listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;

use skydd_api::auth::jwt::{Claims, JwtConfig};
use skydd_api::config::ServerConfig;
use skydd_api::router::build_app_router;
use skydd_api::state::AppState;
use skydd_api::ws::WsManager;
use skydd_core::roles::{ROLE_ADMIN, ROLE_CUSTOMER};
use skydd_core::types::DbId;

const TEST_JWT_SECRET: &str = "integration-test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Delegates to `build_app_router` so integration tests exercise exactly
/// the stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(skydd_events::EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Sign a customer access token for the given customer id.
pub fn customer_token(customer_id: DbId) -> String {
    sign_token(customer_id, ROLE_CUSTOMER)
}

/// Sign an admin access token.
pub fn admin_token() -> String {
    sign_token(999_999, ROLE_ADMIN)
}

fn sign_token(sub: DbId, role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: now + 900,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, path, token, None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, path, token, Some(json)).await
}

pub async fn post(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, path, token, None).await
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, path, token, Some(json)).await
}

pub async fn patch_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, path, token, Some(json)).await
}

pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, path, token, None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seed one customer directly through the repository layer and return its id.
pub async fn seed_customer(pool: &PgPool, email: &str, plan: &str) -> DbId {
    skydd_db::repositories::CustomerRepo::insert(
        pool,
        &skydd_db::models::customer::CreateCustomer {
            display_name: "Anna Andersson".to_string(),
            email: email.to_string(),
            subscription_plan: plan.to_string(),
        },
    )
    .await
    .expect("customer insert should succeed")
    .id
}
