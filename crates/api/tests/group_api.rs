//! HTTP-level integration tests for groups, membership and challenges.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_auth, post_json_auth, put_json_auth,
    register, register_user,
};
use serde_json::{json, Value};

async fn create_group(app: &Router, token: &str, name: &str, is_public: bool) -> i64 {
    let body = json!({"name": name, "description": "Weekly halaqa", "is_public": is_public});
    let response = post_json_auth(app.clone(), "/api/groups", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

fn challenge(kind: &str, target: i32) -> Value {
    json!({
        "title": format!("{kind} challenge"),
        "kind": kind,
        "target": target,
        "start_date": "2025-03-01",
        "end_date": "2025-03-31",
    })
}

async fn create_challenge(app: &Router, token: &str, group_id: i64, body: Value) -> i64 {
    let uri = format!("/api/groups/{group_id}/challenges");
    let response = post_json_auth(app.clone(), &uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn join(app: &Router, token: &str, group_id: i64) -> StatusCode {
    post_auth(app.clone(), &format!("/api/groups/{group_id}/join"), token)
        .await
        .status()
}

// ---------------------------------------------------------------------------
// Groups and membership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn creator_becomes_owner() {
    let app = build_test_app();
    let (token, user_id) = register_user(&app, "founder").await;
    let group_id = create_group(&app, &token, "Masjid Circle", true).await;

    let members = body_json(
        get_auth(app.clone(), &format!("/api/groups/{group_id}/members"), &token).await,
    )
    .await;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"], user_id);
    assert_eq!(members[0]["role"], "owner");

    // Creating or joining a group earns the community achievement.
    let earned = body_json(get_auth(app, "/api/achievements", &token).await).await;
    assert!(earned
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["kind"] == "community"));
}

#[tokio::test]
async fn join_and_leave_public_group() {
    let app = build_test_app();
    let owner = register(&app, "host").await;
    let guest = register(&app, "guest").await;
    let group_id = create_group(&app, &owner, "Open Circle", true).await;

    assert_eq!(join(&app, &guest, group_id).await, StatusCode::CREATED);
    assert_eq!(join(&app, &guest, group_id).await, StatusCode::CONFLICT);

    let members = body_json(
        get_auth(app.clone(), &format!("/api/groups/{group_id}/members"), &owner).await,
    )
    .await;
    assert_eq!(members.as_array().unwrap().len(), 2);

    let leave = format!("/api/groups/{group_id}/leave");
    let response = post_auth(app.clone(), &leave, &guest).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = post_auth(app.clone(), &leave, &guest).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner cannot walk away from their own group.
    let response = post_auth(app, &leave, &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn private_groups_are_hidden_from_outsiders() {
    let app = build_test_app();
    let owner = register(&app, "secretive").await;
    let outsider = register(&app, "outsider").await;
    let private_id = create_group(&app, &owner, "Family", false).await;
    let public_id = create_group(&app, &owner, "Neighbourhood", true).await;

    let visible = body_json(get_auth(app.clone(), "/api/groups", &outsider).await).await;
    let ids: Vec<i64> = visible
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![public_id]);

    let owner_view = body_json(get_auth(app.clone(), "/api/groups", &owner).await).await;
    assert_eq!(owner_view.as_array().unwrap().len(), 2);

    let response = get_auth(app.clone(), &format!("/api/groups/{private_id}"), &outsider).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(join(&app, &outsider, private_id).await, StatusCode::FORBIDDEN);
    assert_eq!(join(&app, &outsider, 9_999).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_owner_updates_or_deletes_group() {
    let app = build_test_app();
    let owner = register(&app, "chair").await;
    let member = register(&app, "attendee").await;
    let group_id = create_group(&app, &owner, "Study Group", true).await;
    join(&app, &member, group_id).await;
    let uri = format!("/api/groups/{group_id}");

    let response = put_json_auth(app.clone(), &uri, json!({"name": "Renamed"}), &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app.clone(), &uri, &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, json!({"name": "Renamed"}), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Renamed");

    let response = put_json_auth(app.clone(), &uri, json!({"name": "  "}), &owner).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let challenge_id = create_challenge(&app, &owner, group_id, challenge("prayer", 10)).await;
    let response = delete_auth(app.clone(), &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Challenges go with the group.
    let response = get_auth(app, &format!("/api/challenges/{challenge_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

#[tokio::test]
async fn only_members_see_or_create_challenges() {
    let app = build_test_app();
    let owner = register(&app, "coach").await;
    let outsider = register(&app, "spectator").await;
    let group_id = create_group(&app, &owner, "Ramadan Team", true).await;
    let challenge_id = create_challenge(&app, &owner, group_id, challenge("fasting", 20)).await;
    let list_uri = format!("/api/groups/{group_id}/challenges");

    let response = get_auth(app.clone(), &list_uri, &outsider).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_json_auth(app.clone(), &list_uri, challenge("quran", 100), &outsider).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let challenge_uri = format!("/api/challenges/{challenge_id}");
    let response = get_auth(app.clone(), &challenge_uri, &outsider).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let list = body_json(get_auth(app, &list_uri, &owner).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["kind"], "fasting");
}

#[tokio::test]
async fn challenge_fields_are_validated() {
    let app = build_test_app();
    let owner = register(&app, "strict").await;
    let group_id = create_group(&app, &owner, "Validation", true).await;
    let uri = format!("/api/groups/{group_id}/challenges");

    let mut inverted = challenge("prayer", 5);
    inverted["end_date"] = json!("2025-02-01");
    for body in [challenge("charity", 5), challenge("prayer", 0), inverted] {
        let response = post_json_auth(app.clone(), &uri, body, &owner).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn challenge_managed_by_creator_or_owner() {
    let app = build_test_app();
    let owner = register(&app, "leader").await;
    let creator = register(&app, "organiser").await;
    let member = register(&app, "participant").await;
    let group_id = create_group(&app, &owner, "Managed", true).await;
    join(&app, &creator, group_id).await;
    join(&app, &member, group_id).await;

    let challenge_id = create_challenge(&app, &creator, group_id, challenge("quran", 500)).await;
    let uri = format!("/api/challenges/{challenge_id}");

    let response = put_json_auth(app.clone(), &uri, json!({"target": 600}), &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, json!({"target": 600}), &creator).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["target"], 600);

    // The merged window must stay ordered.
    let body = json!({"end_date": "2025-02-01"});
    let response = put_json_auth(app.clone(), &uri, body, &owner).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(app.clone(), &uri, &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app.clone(), &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn challenge_progress_counts_activity_in_window() {
    let app = build_test_app();
    let (owner, owner_id) = register_user(&app, "imran").await;
    let (member, member_id) = register_user(&app, "salma").await;
    let group_id = create_group(&app, &owner, "Prayer Push", true).await;
    join(&app, &member, group_id).await;

    let challenge_id = create_challenge(&app, &owner, group_id, challenge("prayer", 2)).await;

    for (name, date, status) in [
        ("fajr", "2025-03-01", "on_time"),
        ("dhuhr", "2025-03-01", "late"),
        ("asr", "2025-03-02", "missed"),
        // Outside the window.
        ("fajr", "2025-04-01", "on_time"),
    ] {
        let body = json!({"name": name, "prayer_date": date, "status": status});
        let response = post_json_auth(app.clone(), "/api/prayers", body, &member).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let body = json!({"name": "isha", "prayer_date": "2025-03-15"});
    post_json_auth(app.clone(), "/api/prayers", body, &owner).await;

    let response = get_auth(
        app,
        &format!("/api/challenges/{challenge_id}/progress"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let progress = body_json(response).await;
    assert_eq!(progress["target"], 2);

    let members = progress["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["user_id"], member_id);
    assert_eq!(members[0]["username"], "salma");
    assert_eq!(members[0]["progress"], 2);
    assert_eq!(members[0]["completed"], true);
    assert_eq!(members[1]["user_id"], owner_id);
    assert_eq!(members[1]["progress"], 1);
    assert_eq!(members[1]["completed"], false);
}

#[tokio::test]
async fn quran_challenge_progress_sums_ayat() {
    let app = build_test_app();
    let owner = register(&app, "hafiz").await;
    let group_id = create_group(&app, &owner, "Khatm Club", true).await;
    let challenge_id = create_challenge(&app, &owner, group_id, challenge("quran", 20)).await;

    for (surah, start, end) in [(1, 1, 7), (2, 1, 10)] {
        let body = json!({
            "reading_date": "2025-03-03",
            "surah": surah,
            "start_ayah": start,
            "end_ayah": end,
        });
        post_json_auth(app.clone(), "/api/quran-readings", body, &owner).await;
    }

    let progress = body_json(
        get_auth(app, &format!("/api/challenges/{challenge_id}/progress"), &owner).await,
    )
    .await;
    assert_eq!(progress["members"][0]["progress"], 17);
    assert_eq!(progress["members"][0]["completed"], false);
}
