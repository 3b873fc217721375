// ABOUTME: Integration tests for the catalog route handlers
// ABOUTME: Tests CRUD over every catalog table and the admin guard on writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{
    create_admin_token, create_test_app, create_test_server_resources, create_viewer_token,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// Public reads
// ============================================================================

#[tokio::test]
async fn test_every_catalog_lists_empty() {
    let resources = create_test_server_resources().await.unwrap();

    for segment in [
        "articles",
        "campaigns",
        "projects",
        "poetry",
        "skills",
        "status-effects",
    ] {
        let response = AxumTestRequest::get(&format!("/api/{segment}"))
            .send(create_test_app(&resources))
            .await;
        assert_eq!(response.status(), 200, "{segment}");
        let body: Value = response.json();
        assert_eq!(body, json!([]), "{segment}");
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/api/poetry/missing-id")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json();
    assert_eq!(body["error"], "Poem missing-id not found");
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
}

// ============================================================================
// Admin guard
// ============================================================================

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/articles")
        .json(&json!({ "name": "Sneaky" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_REQUIRED");

    let list: Value = AxumTestRequest::get("/api/articles")
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_garbage_token_is_unauthorized() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/projects")
        .bearer("not-a-jwt")
        .json(&json!({ "name": "Sneaky" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_viewer_cannot_write() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_viewer_token(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/skills")
        .bearer(&token)
        .json(&json!({ "name": "Lockpicking" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 403);

    let body: Value = response.json();
    assert_eq!(body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let created: Value = AxumTestRequest::post("/api/campaigns")
        .bearer(&token)
        .json(&json!({ "name": "Winter Arc" }))
        .send(create_test_app(&resources))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let response = AxumTestRequest::delete(&format!("/api/campaigns/{id}"))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let still_there = AxumTestRequest::get(&format!("/api/campaigns/{id}"))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(still_there.status(), 200);
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
async fn test_article_lifecycle() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/articles")
        .bearer(&token)
        .json(&json!({
            "name": "On Habits",
            "description": "Small loops",
            "link": "https://example.com/habits",
            "progress": 40
        }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 201);

    let created: Value = response.json();
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["name"], "On Habits");
    assert_eq!(created["link"], "https://example.com/habits");
    assert_eq!(created["progress"], 40.0);
    assert!(created["created_at"].is_string());

    let fetched: Value = AxumTestRequest::get(&format!("/api/articles/{id}"))
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(fetched, created);

    let response = AxumTestRequest::put(&format!("/api/articles/{id}"))
        .bearer(&token)
        .json(&json!({ "progress": 100 }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let updated: Value = response.json();
    assert_eq!(updated["progress"], 100.0);
    assert_eq!(updated["name"], "On Habits");
    assert_eq!(updated["description"], "Small loops");
    assert_eq!(updated["created_at"], created["created_at"]);

    let listed: Value = AxumTestRequest::get("/api/articles")
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["progress"], 100.0);

    let response = AxumTestRequest::delete(&format!("/api/articles/{id}"))
        .bearer(&token)
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Deleted");

    let gone = AxumTestRequest::get(&format!("/api/articles/{id}"))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(gone.status(), 404);

    let again = AxumTestRequest::delete(&format!("/api/articles/{id}"))
        .bearer(&token)
        .send(create_test_app(&resources))
        .await;
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn test_campaigns_never_return_link() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let created: Value = AxumTestRequest::post("/api/campaigns")
        .bearer(&token)
        .json(&json!({ "name": "Marathon", "link": "https://example.com" }))
        .send(create_test_app(&resources))
        .await
        .json();
    assert!(created.get("link").is_none());

    let listed: Value = AxumTestRequest::get("/api/campaigns")
        .send(create_test_app(&resources))
        .await
        .json();
    assert!(listed[0].get("link").is_none());
    assert_eq!(listed[0]["name"], "Marathon");
}

#[tokio::test]
async fn test_status_effect_uses_spaced_attribute_field() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/status-effects")
        .bearer(&token)
        .json(&json!({
            "name": "Well Rested",
            "grade": "A",
            "attribute affected": "resilience"
        }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 201);

    let created: Value = response.json();
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["attribute affected"], "resilience");

    let updated: Value = AxumTestRequest::put(&format!("/api/status-effects/{id}"))
        .bearer(&token)
        .json(&json!({ "grade": "S" }))
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(updated["grade"], "S");
    assert_eq!(updated["attribute affected"], "resilience");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/skills")
        .bearer(&token)
        .json(&json!({ "name": "   " }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/articles")
        .bearer(&token)
        .raw_json(r#"{"name": "#)
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_FORMAT");
    assert!(!body["error"].as_str().unwrap().is_empty());

    let response = AxumTestRequest::put("/api/status-effects/any")
        .bearer(&token)
        .raw_json(r#"{"grade": 7}"#)
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    let response = AxumTestRequest::put("/api/skills/nope")
        .bearer(&token)
        .json(&json!({ "grade": "B" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json();
    assert_eq!(body["error"], "Skill nope not found");
}

#[tokio::test]
async fn test_list_is_in_creation_order() {
    let resources = create_test_server_resources().await.unwrap();
    let token = create_admin_token(&resources).await.unwrap();

    for name in ["First", "Second", "Third"] {
        AxumTestRequest::post("/api/projects")
            .bearer(&token)
            .json(&json!({ "name": name }))
            .send(create_test_app(&resources))
            .await;
    }

    let listed: Value = AxumTestRequest::get("/api/projects")
        .send(create_test_app(&resources))
        .await
        .json();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}
