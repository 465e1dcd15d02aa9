//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router (same middleware stack as production) backed
//! by the in-memory store, so no database is required.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use noor_api::auth::jwt::JwtConfig;
use noor_api::config::ServerConfig;
use noor_api::router::build_app_router;
use noor_api::state::AppState;
use noor_db::MemStorage;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Email that registers with the admin role in [`test_config`].
pub const ADMIN_EMAIL: &str = "admin@noor.test";

pub const PASSWORD: &str = "bismillah123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        password_min_length: 8,
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        session_cookie_secure: false,
        static_dir: None,
        sync_retention_days: 30,
    }
}

/// Build the full application router over a fresh, empty in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

pub fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState {
        storage: Arc::new(MemStorage::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register `username` (email `<username>@noor.test`) and return the access token.
pub async fn register(app: &Router, username: &str) -> String {
    register_with_email(app, username, &format!("{username}@noor.test")).await
}

pub async fn register_with_email(app: &Router, username: &str, email: &str) -> String {
    let body = json!({
        "username": username,
        "email": email,
        "password": PASSWORD,
    });
    let response = post_json(app.clone(), "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "register {username}");
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Register and return both the token and the new user's id.
pub async fn register_user(app: &Router, username: &str) -> (String, i64) {
    let token = register(app, username).await;
    let me = body_json(get_auth(app.clone(), "/api/auth/me", &token).await).await;
    (token, me["id"].as_i64().unwrap())
}
