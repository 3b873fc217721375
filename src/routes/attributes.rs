// ABOUTME: Attribute log routes: public reads with an optional attribute filter, admin writes
// ABOUTME: Rows written here are what the score engine reduces for each stat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::{require_admin_middleware, AdminContext};
use crate::resources::ServerResources;
use crate::routes::JsonBody;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use status_core::constants::tables;
use status_core::models::AttributeLog;
use std::sync::Arc;

/// Query parameters for listing attribute logs
#[derive(Debug, Default, Deserialize)]
pub struct AttributeLogQuery {
    /// Only rows for this attribute (case-insensitive)
    pub attribute: Option<String>,
}

/// Attribute log routes
pub struct AttributeLogRoutes;

impl AttributeLogRoutes {
    /// Create the attribute log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let public = Router::new()
            .route("/api/attributes_log", get(Self::handle_list))
            .route("/api/attributes_log/:id", get(Self::handle_get));

        let admin = Router::new()
            .route("/api/attributes_log", post(Self::handle_create))
            .route(
                "/api/attributes_log/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn_with_state(
                resources.clone(),
                require_admin_middleware,
            ));

        public.merge(admin).with_state(resources)
    }

    /// Handle GET /api/attributes_log
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<AttributeLogQuery>,
    ) -> Result<Response, AppError> {
        let records = match query.attribute.as_deref().map(str::trim) {
            Some(attribute) if !attribute.is_empty() => {
                resources.database.list_attribute_logs_for(attribute).await?
            }
            _ => resources.database.list_attribute_logs().await?,
        };
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    /// Handle GET /api/attributes_log/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .get_attribute_log(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attribute log {id}")))?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle POST /api/attributes_log
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        JsonBody(row): JsonBody<AttributeLog>,
    ) -> Result<Response, AppError> {
        let record = resources.database.create_attribute_log(row).await?;
        AppLogger::log_record_mutation("create", tables::ATTRIBUTES_LOG, &record.id, &admin.email);
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Handle PUT /api/attributes_log/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        Path(id): Path<String>,
        JsonBody(patch): JsonBody<AttributeLog>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .update_attribute_log(&id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attribute log {id}")))?;
        AppLogger::log_record_mutation("update", tables::ATTRIBUTES_LOG, &id, &admin.email);
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle DELETE /api/attributes_log/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Extension(AdminContext(admin)): Extension<AdminContext>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_attribute_log(&id).await? {
            return Err(AppError::not_found(format!("Attribute log {id}")));
        }
        AppLogger::log_record_mutation("delete", tables::ATTRIBUTES_LOG, &id, &admin.email);
        Ok((StatusCode::OK, Json(json!({ "message": "Deleted" }))).into_response())
    }
}
