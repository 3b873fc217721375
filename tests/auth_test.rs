// ABOUTME: Integration tests for admin authentication
// ABOUTME: Covers password login, session introspection, and token rejection paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{
    create_test_app, create_test_auth_manager, create_test_config, create_test_database,
    create_test_server_resources, create_test_user,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use status_engine::LevelCurve;
use status_window::auth::{generate_jwt_secret, hash_password, AuthManager};
use status_window::resources::ServerResources;
use status_window::routes::LoginResponse;
use std::sync::Arc;

const EMAIL: &str = "owner@example.com";
const PASSWORD: &str = "correct horse battery staple";

async fn resources_with_password_user() -> Arc<ServerResources> {
    let resources = create_test_server_resources().await.unwrap();
    let hash = hash_password(PASSWORD).unwrap();
    resources
        .database
        .upsert_admin_user(EMAIL, &hash, true)
        .await
        .unwrap();
    resources
}

#[tokio::test]
async fn test_login_then_write_with_token() {
    let resources = resources_with_password_user().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": EMAIL, "password": PASSWORD }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let login: LoginResponse = response.json();
    assert_eq!(login.user.email, EMAIL);
    assert!(login.user.is_admin);
    assert!(!login.token.is_empty());

    let created = AxumTestRequest::post("/api/poetry")
        .bearer(&login.token)
        .json(&json!({ "name": "Ode to Mornings" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(created.status(), 201);

    let session: Value = AxumTestRequest::get("/api/auth/session")
        .bearer(&login.token)
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(session["email"], EMAIL);
    assert_eq!(session["is_admin"], true);

    let user = resources
        .database
        .get_admin_user_by_email(EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let resources = resources_with_password_user().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "Owner@Example.COM", "password": PASSWORD }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let resources = resources_with_password_user().await;

    for (email, password) in [(EMAIL, "wrong"), ("nobody@example.com", PASSWORD)] {
        let response = AxumTestRequest::post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send(create_test_app(&resources))
            .await;
        assert_eq!(response.status(), 401, "{email}");

        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid email or password");
        assert_eq!(body["code"], "AUTH_INVALID");
    }
}

#[tokio::test]
async fn test_login_with_malformed_body() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/auth/login")
        .raw_json(r#"{"email": "owner@example.com"}"#)
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_session_requires_token() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/api/auth/session")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_session_reports_read_only_user() {
    let resources = create_test_server_resources().await.unwrap();
    let user = create_test_user(&resources, "reader@example.com", false)
        .await
        .unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap().token;

    let session: Value = AxumTestRequest::get("/api/auth/session")
        .bearer(&token)
        .send(create_test_app(&resources))
        .await
        .json();
    assert_eq!(session["email"], "reader@example.com");
    assert_eq!(session["is_admin"], false);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let config = create_test_config().unwrap();
    let curve = LevelCurve::new(config.xp_per_level).unwrap();
    let resources = Arc::new(ServerResources::new(
        create_test_database().await.unwrap(),
        AuthManager::new(&generate_jwt_secret(), -1),
        config,
        curve,
    ));
    let user = create_test_user(&resources, "late@example.com", true)
        .await
        .unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap().token;

    let response = AxumTestRequest::post("/api/skills")
        .bearer(&token)
        .json(&json!({ "name": "Patience" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_EXPIRED");
}

#[tokio::test]
async fn test_token_from_another_server_is_rejected() {
    let resources = create_test_server_resources().await.unwrap();
    let user = create_test_user(&resources, "admin@example.com", true)
        .await
        .unwrap();
    let foreign = create_test_auth_manager()
        .generate_token(&user)
        .unwrap()
        .token;

    let response = AxumTestRequest::post("/api/articles")
        .bearer(&foreign)
        .json(&json!({ "name": "Forged" }))
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_INVALID");
}
