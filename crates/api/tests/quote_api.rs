//! HTTP-level integration tests for quotes and the quote of the day.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{
    body_json, build_test_app, delete_auth, get, post_json_auth, register, register_with_email,
    ADMIN_EMAIL,
};
use noor_core::quotes::daily_index;
use serde_json::json;

fn quote(text: &str, category: &str) -> serde_json::Value {
    json!({"text": text, "source": "Test 1:1", "category": category})
}

#[tokio::test]
async fn only_admins_manage_quotes() {
    let app = build_test_app();
    let admin = register_with_email(&app, "admin", ADMIN_EMAIL).await;
    let user = register(&app, "reader").await;

    let body = quote("Be patient.", "hadith");
    let response = post_json_auth(app.clone(), "/api/quotes", body.clone(), &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), "/api/quotes", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/quotes/{id}");

    // Reading is public.
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["text"], "Be patient.");

    let response = delete_auth(app.clone(), &uri, &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_quote_is_rejected() {
    let app = build_test_app();
    let admin = register_with_email(&app, "admin", ADMIN_EMAIL).await;
    let response = post_json_auth(app, "/api/quotes", quote("   ", "quran"), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_filters_by_category() {
    let app = build_test_app();
    let admin = register_with_email(&app, "admin", ADMIN_EMAIL).await;
    post_json_auth(app.clone(), "/api/quotes", quote("First", "quran"), &admin).await;
    post_json_auth(app.clone(), "/api/quotes", quote("Second", "hadith"), &admin).await;

    let all = body_json(get(app.clone(), "/api/quotes").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let hadith = body_json(get(app, "/api/quotes?category=hadith").await).await;
    let hadith = hadith.as_array().unwrap();
    assert_eq!(hadith.len(), 1);
    assert_eq!(hadith[0]["text"], "Second");
}

#[tokio::test]
async fn daily_quote_is_null_without_quotes() {
    let app = build_test_app();
    let response = get(app, "/api/quotes/daily").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());
}

#[tokio::test]
async fn daily_quote_is_deterministic_per_day() {
    let app = build_test_app();
    let admin = register_with_email(&app, "admin", ADMIN_EMAIL).await;
    let texts = ["One", "Two", "Three"];
    for text in texts {
        post_json_auth(app.clone(), "/api/quotes", quote(text, "quran"), &admin).await;
    }

    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let expected = texts[daily_index(day, texts.len()).unwrap()];

    let first = body_json(get(app.clone(), "/api/quotes/daily?date=2025-03-01").await).await;
    let second = body_json(get(app.clone(), "/api/quotes/daily?date=2025-03-01").await).await;
    assert_eq!(first["text"], expected);
    assert_eq!(first, second);

    let next = body_json(get(app, "/api/quotes/daily?date=2025-03-02").await).await;
    assert_ne!(next["text"], first["text"]);
}

#[tokio::test]
async fn daily_quote_counts_days_from_unix_epoch() {
    let app = build_test_app();
    let admin = register_with_email(&app, "admin", ADMIN_EMAIL).await;
    for text in ["One", "Two", "Three"] {
        post_json_auth(app.clone(), "/api/quotes", quote(text, "quran"), &admin).await;
    }

    let epoch = body_json(get(app.clone(), "/api/quotes/daily?date=1970-01-01").await).await;
    assert_eq!(epoch["text"], "One");
    let next = body_json(get(app, "/api/quotes/daily?date=1970-01-02").await).await;
    assert_eq!(next["text"], "Two");
}
