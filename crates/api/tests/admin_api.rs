//! Admin editing endpoints: auth, CRUD, and ordering.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, delete_auth, get, get_auth, post_json_auth, project,
    put_json_auth, token_with_role,
};
use folio_core::store::ProjectStore;
use serde_json::json;

fn ids(json: &serde_json::Value) -> Vec<&str> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

fn abc() -> Vec<folio_core::project::Project> {
    vec![project("a", 1), project("b", 2), project("c", 3)]
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_or_invalid_token_returns_401() {
    let app = build_test_app(vec![]).await;
    let response = common::json_auth(
        app.app(),
        axum::http::Method::POST,
        "/api/v1/admin/projects/refresh",
        json!({}),
        "not-a-jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app.app(), "/api/v1/admin/notifications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn non_admin_role_returns_403() {
    let app = build_test_app(vec![project("a", 1)]).await;
    let token = token_with_role("authenticated");

    let response = delete_auth(app.app(), "/api/v1/admin/projects/a", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.repository.find("a").is_some());
}

#[tokio::test]
async fn notification_feed_requires_websocket_upgrade() {
    let app = build_test_app(vec![]).await;
    let response = get_auth(app.app(), "/api/v1/admin/notifications", &admin_token()).await;
    assert!(response.status().is_client_error());
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_appends_after_last_project() {
    let app = build_test_app(vec![project("a", 4), project("b", 9)]).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects",
        json!({
            "title": "Portfolio",
            "titleKo": "포트폴리오",
            "categoryColor": "purple",
            "completion": 60,
            "displayOrder": 1
        }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(json["data"]["displayOrder"], 10);
    assert_eq!(json["data"]["category"], "Website");
    assert_eq!(json["data"]["categoryColor"], "purple");

    let listed = body_json(get(app.app(), "/api/v1/projects").await).await;
    assert_eq!(ids(&listed), ["a", "b", id.as_str()]);
}

#[tokio::test]
async fn create_keeps_client_supplied_id() {
    let app = build_test_app(vec![]).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects",
        json!({ "id": "client-id", "title": "First" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "client-id");
    assert_eq!(json["data"]["displayOrder"], 1);
}

#[tokio::test]
async fn create_rejects_out_of_range_completion() {
    let app = build_test_app(vec![]).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects",
        json!({ "title": "Overdone", "completion": 150 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn duplicate_id_is_a_store_failure() {
    let app = build_test_app(vec![project("a", 1)]).await;
    let mut notifications = app.notifications.subscribe();

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects",
        json!({ "id": "a", "title": "Again" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_ERROR");
    assert_eq!(json["error"], "Failed to add project");
    assert_eq!(notifications.recv().await.unwrap().message, "Failed to add project");
}

#[tokio::test]
async fn update_replaces_fields_and_path_id_wins() {
    let mut original = project("a", 3);
    original.github_url = "https://github.com/example/a".to_string();
    let app = build_test_app(vec![original]).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/projects/a",
        json!({ "id": "other", "title": "Renamed", "completion": 100 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "a");
    assert_eq!(json["data"]["title"], "Renamed");
    assert_eq!(json["data"]["githubUrl"], "");
    assert_eq!(json["data"]["displayOrder"], 3);
    assert!(app.repository.find("other").is_none());
}

#[tokio::test]
async fn update_unknown_project_returns_404() {
    let app = build_test_app(vec![]).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/projects/ghost",
        json!({ "title": "Nobody" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_project() {
    let app = build_test_app(vec![project("a", 1), project("b", 2)]).await;

    let response = delete_auth(app.app(), "/api/v1/admin/projects/a", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.app(), "/api/v1/projects/a").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.len().await, 1);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reorder_by_ids_renumbers_from_one() {
    let app = build_test_app(abc()).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/projects/order",
        json!({ "ids": ["c", "a", "b"] }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(ids(&json), ["c", "a", "b"]);
    assert_eq!(json["data"][0]["displayOrder"], 1);
    assert_eq!(json["data"][2]["displayOrder"], 3);

    let stored = app.store.select_all().await.unwrap();
    let stored_ids: Vec<&str> = stored.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(stored_ids, ["c", "a", "b"]);
}

#[tokio::test]
async fn reorder_must_list_every_project_once() {
    let app = build_test_app(abc()).await;

    for order in [json!(["a", "b"]), json!(["a", "a", "b"]), json!(["a", "b", "x"])] {
        let response = put_json_auth(
            app.app(),
            "/api/v1/admin/projects/order",
            json!({ "ids": order }),
            &admin_token(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let listed = body_json(get(app.app(), "/api/v1/projects").await).await;
    assert_eq!(ids(&listed), ["a", "b", "c"]);
}

#[tokio::test]
async fn move_shifts_one_project() {
    let app = build_test_app(abc()).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects/move",
        json!({ "from": 0, "to": 2 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), ["b", "c", "a"]);
}

#[tokio::test]
async fn move_out_of_range_returns_400() {
    let app = build_test_app(abc()).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects/move",
        json!({ "from": 0, "to": 7 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_picks_up_external_writes() {
    let app = build_test_app(vec![project("a", 1)]).await;
    app.store.insert(&project("b", 2)).await.unwrap();

    let listed = body_json(get(app.app(), "/api/v1/projects").await).await;
    assert_eq!(ids(&listed), ["a"]);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/projects/refresh",
        json!({}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), ["a", "b"]);
}
