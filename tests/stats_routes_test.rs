// ABOUTME: Integration tests for the public dashboard routes
// ABOUTME: Covers stat scoring over HTTP, engine error markers, the overview, and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_test_app, create_test_server_resources};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;
use status_core::models::{AttributeLog, ExperienceEntry};
use status_window::resources::ServerResources;
use std::sync::Arc;

fn approx(actual: &Value, expected: f64) -> bool {
    actual
        .as_f64()
        .is_some_and(|value| (value - expected).abs() < 1e-9)
}

async fn seed_attributes(resources: &Arc<ServerResources>, rows: Vec<AttributeLog>) {
    for row in rows {
        resources.database.create_attribute_log(row).await.unwrap();
    }
}

#[tokio::test]
async fn test_luck_is_raw_sum_with_last_metric_wins() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(
        &resources,
        vec![
            AttributeLog::new("luck", "Coin Flips", 3.0),
            AttributeLog::new("luck", "Coin Flips", 4.5),
            AttributeLog::new("luck", "Found Money", 1.0),
        ],
    )
    .await;

    let response = AxumTestRequest::get("/api/stats/luck")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["name"], "Luck");
    assert!(approx(&body["value"], 8.5));
    assert!(approx(&body["breakdown"]["Coin Flips"], 4.5));
    assert!(approx(&body["breakdown"]["Found Money"], 1.0));
}

#[tokio::test]
async fn test_stat_name_is_case_insensitive() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(
        &resources,
        vec![AttributeLog::new("Curiosity", "Questions Asked", 12.0)],
    )
    .await;

    let response = AxumTestRequest::get("/api/stats/CURIOSITY")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["name"], "Curiosity");
    assert!(approx(&body["value"], 12.0));
}

#[tokio::test]
async fn test_weighted_attributes_multiply_weightage() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(
        &resources,
        vec![
            AttributeLog::new("intelligence", "Books Read", 2.0).with_weightage(3.0),
            AttributeLog::new("intelligence", "Courses", 4.0).with_weightage(0.0),
        ],
    )
    .await;

    let body: Value = AxumTestRequest::get("/api/stats/intelligence")
        .send(create_test_app(&resources))
        .await
        .json();

    assert!(approx(&body["value"], 10.0));
    assert!(approx(&body["breakdown"]["Books Read"], 6.0));
    assert!(approx(&body["breakdown"]["Courses"], 4.0));
}

#[tokio::test]
async fn test_strength_uses_profile_adjustments() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(
        &resources,
        vec![AttributeLog::new("strength", "Bench Press (Kg)", 77.15)],
    )
    .await;

    let body: Value = AxumTestRequest::get("/api/stats/strength")
        .send(create_test_app(&resources))
        .await
        .json();

    // 1.0 * 1.005 * 0.96 * 1.0753
    assert!(approx(&body["value"], 1.04));
    assert!(approx(&body["breakdown"]["Bench Press (Kg)"], 1.04));
}

#[tokio::test]
async fn test_unknown_attribute_returns_error_marker() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/api/stats/wisdom")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["name"], "Wisdom");
    assert!(approx(&body["value"], 0.0));
    assert_eq!(body["breakdown"]["error"], "Invalid attribute");
}

#[tokio::test]
async fn test_attribute_without_rows_reports_no_data() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(&resources, vec![AttributeLog::new("luck", "Coin Flips", 1.0)]).await;

    let body: Value = AxumTestRequest::get("/api/stats/resilience")
        .send(create_test_app(&resources))
        .await
        .json();

    assert!(approx(&body["value"], 0.0));
    assert_eq!(body["breakdown"]["error"], "No data found");
}

#[tokio::test]
async fn test_missing_stat_name_is_bad_request() {
    let resources = create_test_server_resources().await.unwrap();

    for uri in ["/api/stats", "/api/stats/"] {
        let response = AxumTestRequest::get(uri)
            .send(create_test_app(&resources))
            .await;
        assert_eq!(response.status(), 400, "{uri}");

        let body: Value = response.json();
        assert_eq!(body["error"], "Missing stat name");
        assert_eq!(body["code"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_experience_pseudo_stat() {
    let resources = create_test_server_resources().await.unwrap();
    for points in [100.0, 50.0] {
        resources
            .database
            .create_experience(ExperienceEntry::points(points))
            .await
            .unwrap();
    }

    let body: Value = AxumTestRequest::get("/api/stats/experience")
        .send(create_test_app(&resources))
        .await
        .json();

    assert_eq!(body["name"], "Experience");
    assert!(approx(&body["value"], 150.0));
    assert!(approx(&body["breakdown"]["experience"], 150.0));
    assert_eq!(body["breakdown"]["current_level"], 2);
    assert!(approx(&body["breakdown"]["progress_percentage"], 50.0));
}

#[tokio::test]
async fn test_status_overview_lists_every_attribute() {
    let resources = create_test_server_resources().await.unwrap();
    seed_attributes(&resources, vec![AttributeLog::new("luck", "Coin Flips", 2.0)]).await;
    resources
        .database
        .create_experience(ExperienceEntry::points(250.0))
        .await
        .unwrap();

    let response = AxumTestRequest::get("/api/status")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    let names: Vec<&str> = body["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["Strength", "Intelligence", "Resilience", "Creativity", "Luck", "Curiosity"]
    );
    assert!(approx(&body["attributes"][4]["value"], 2.0));
    assert_eq!(body["attributes"][0]["breakdown"]["error"], "No data found");
    assert_eq!(body["experience"]["current_level"], 3);
    assert!(approx(&body["experience"]["progress_percentage"], 50.0));
    assert!(body["profile"]["name"].is_string());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let resources = create_test_server_resources().await.unwrap();

    let health = AxumTestRequest::get("/health")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(health.status(), 200);
    assert!(health.header("x-request-id").is_some());
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "status-window");

    let ready = AxumTestRequest::get("/ready")
        .send(create_test_app(&resources))
        .await;
    assert_eq!(ready.status(), 200);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(create_test_app(&resources))
        .await;

    assert_eq!(response.header("x-request-id"), Some("trace-me-123"));
}
