// ABOUTME: Public dashboard routes for attribute stats and the status overview
// ABOUTME: Engine error markers are data and come back with 200; only a blank name is a 400
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::status;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Stat and overview routes
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create the stats routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/stats", get(Self::handle_missing_name))
            .route("/api/stats/", get(Self::handle_missing_name))
            .route("/api/stats/:name", get(Self::handle_get_stat))
            .route("/api/status", get(Self::handle_overview))
            .with_state(resources)
    }

    /// Handle GET /api/stats/:name
    async fn handle_get_stat(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let stat = status::stat(&resources, &name).await?;
        Ok((StatusCode::OK, Json(stat)).into_response())
    }

    /// Handle GET /api/stats without a name
    async fn handle_missing_name() -> AppError {
        AppError::invalid_input("Missing stat name")
    }

    /// Handle GET /api/status
    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let overview = status::overview(&resources).await?;
        Ok((StatusCode::OK, Json(overview)).into_response())
    }
}
