// ABOUTME: Experience routes: level summaries for the dashboard and experience log CRUD for admins
// ABOUTME: Reads are public; writes sit behind the admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::{require_admin_middleware, AdminContext};
use crate::resources::ServerResources;
use crate::routes::JsonBody;
use crate::services::status;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde_json::json;
use status_core::constants::tables;
use status_core::models::ExperienceEntry;
use std::sync::Arc;

/// Experience routes
pub struct ExperienceRoutes;

impl ExperienceRoutes {
    /// Create the experience routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let public = Router::new()
            .route("/api/experience", get(Self::handle_detailed))
            .route("/api/experience_log", get(Self::handle_summary))
            .route("/api/experience_log/records", get(Self::handle_list))
            .route("/api/experience_log/records/:id", get(Self::handle_get));

        let admin = Router::new()
            .route("/api/experience_log/records", post(Self::handle_create))
            .route(
                "/api/experience_log/records/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn_with_state(
                resources.clone(),
                require_admin_middleware,
            ));

        public.merge(admin).with_state(resources)
    }

    /// Handle GET /api/experience - level state with thresholds
    async fn handle_detailed(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let state = status::level_state(&resources).await?;
        Ok((StatusCode::OK, Json(state.summary())).into_response())
    }

    /// Handle GET /api/experience_log - level state only
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let state = status::level_state(&resources).await?;
        Ok((StatusCode::OK, Json(state)).into_response())
    }

    /// Handle GET /api/experience_log/records
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let records = resources.database.list_experience().await?;
        Ok((StatusCode::OK, Json(json!({ "records": records }))).into_response())
    }

    /// Handle GET /api/experience_log/records/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .get_experience(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Experience entry {id}")))?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle POST /api/experience_log/records
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        JsonBody(entry): JsonBody<ExperienceEntry>,
    ) -> Result<Response, AppError> {
        let record = resources.database.create_experience(entry).await?;
        AppLogger::log_record_mutation("create", tables::EXPERIENCE_LOG, &record.id, &admin.email);
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Handle PUT /api/experience_log/records/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        Path(id): Path<String>,
        JsonBody(patch): JsonBody<ExperienceEntry>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .update_experience(&id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Experience entry {id}")))?;
        AppLogger::log_record_mutation("update", tables::EXPERIENCE_LOG, &id, &admin.email);
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle DELETE /api/experience_log/records/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_experience(&id).await? {
            return Err(AppError::not_found(format!("Experience entry {id}")));
        }
        AppLogger::log_record_mutation("delete", tables::EXPERIENCE_LOG, &id, &admin.email);
        Ok((StatusCode::OK, Json(json!({ "message": "Deleted" }))).into_response())
    }
}
