//! HTTP-level integration tests for registration, login, sessions and the
//! current-user endpoints.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use common::{
    body_json, build_test_app, get, get_auth, post_json, put_json_auth, register,
    register_with_email, ADMIN_EMAIL, PASSWORD,
};
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_token_user_and_session_cookie() {
    let app = build_test_app();
    let body = json!({
        "username": "aisha",
        "email": "Aisha@Noor.Test",
        "password": PASSWORD,
        "display_name": "Aisha",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("register should set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("noor_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    assert!(json["access_token"].as_str().unwrap().len() > 20);
    assert_eq!(json["user"]["username"], "aisha");
    assert_eq!(json["user"]["email"], "aisha@noor.test");
    assert_eq!(json["user"]["role"], "user");
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_username_or_email_is_conflict() {
    let app = build_test_app();
    register(&app, "omar").await;

    let same_name = json!({"username": "omar", "email": "other@noor.test", "password": PASSWORD});
    let response = post_json(app.clone(), "/api/auth/register", same_name).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let same_email = json!({"username": "omar2", "email": "OMAR@noor.test", "password": PASSWORD});
    let response = post_json(app, "/api/auth/register", same_email).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn register_validates_input() {
    let app = build_test_app();
    let cases = [
        json!({"username": "ab", "email": "a@noor.test", "password": PASSWORD}),
        json!({"username": "bad name", "email": "a@noor.test", "password": PASSWORD}),
        json!({"username": "valid", "email": "not-an-email", "password": PASSWORD}),
        json!({"username": "valid", "email": "a@noor.test", "password": "short"}),
    ];
    for body in cases {
        let response = post_json(app.clone(), "/api/auth/register", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn admin_emails_register_as_admin() {
    let app = build_test_app();
    let token = register_with_email(&app, "imam", ADMIN_EMAIL).await;
    let me = body_json(get_auth(app, "/api/auth/me", &token).await).await;
    assert_eq!(me["role"], "admin");
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_correct_password() {
    let app = build_test_app();
    register(&app, "yusuf").await;

    let body = json!({"username": "yusuf", "password": PASSWORD});
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_some());
    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "yusuf");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = build_test_app();
    register(&app, "maryam").await;

    let wrong_password = json!({"username": "maryam", "password": "wrong-password"});
    let response = post_json(app.clone(), "/api/auth/login", wrong_password).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let first = body_json(response).await;

    let unknown_user = json!({"username": "nobody", "password": PASSWORD});
    let response = post_json(app, "/api/auth/login", unknown_user).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], first["error"]);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = build_test_app();
    let response = post_json(app, "/api/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_requires_authentication() {
    let app = build_test_app();
    let response = get(app.clone(), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let app = build_test_app();
    let token = register(&app, "bilal").await;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(COOKIE, format!("theme=dark; noor_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "bilal");
}

#[tokio::test]
async fn update_me_changes_profile() {
    let app = build_test_app();
    let token = register(&app, "khadija").await;

    let body = json!({"email": "Khadija.New@Noor.Test", "display_name": "Khadija"});
    let response = put_json_auth(app, "/api/auth/me", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "khadija.new@noor.test");
    assert_eq!(json["display_name"], "Khadija");
}

#[tokio::test]
async fn update_me_rejects_taken_email() {
    let app = build_test_app();
    register(&app, "hamza").await;
    let token = register(&app, "zaid").await;

    let body = json!({"email": "hamza@noor.test"});
    let response = put_json_auth(app, "/api/auth/me", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
