// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness reports the process is up; readiness also pings the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Health check routes for service monitoring

use crate::resources::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use status_core::constants::service_names;
use std::sync::Arc;
use tracing::error;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::STATUS_WINDOW,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        match sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
        {
            Ok(_) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "timestamp": Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
            Err(e) => {
                error!("Readiness check failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "unavailable",
                        "timestamp": Utc::now().to_rfc3339()
                    })),
                )
                    .into_response()
            }
        }
    }
}
