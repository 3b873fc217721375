// ABOUTME: Catalog routes for articles, campaigns, projects, poetry, skills, and status effects
// ABOUTME: One route set per table, generated from CatalogKind; writes sit behind the admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Catalog routes
//!
//! Every catalog table gets the same five endpoints under `/api/<segment>`:
//!
//! | Method | Path | Access |
//! |---|---|---|
//! | GET | `/api/<segment>` | public |
//! | GET | `/api/<segment>/:id` | public |
//! | POST | `/api/<segment>` | admin |
//! | PUT | `/api/<segment>/:id` | admin |
//! | DELETE | `/api/<segment>/:id` | admin |

use crate::database::CatalogKind;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::{require_admin_middleware, AdminContext};
use crate::resources::ServerResources;
use crate::routes::JsonBody;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde_json::json;
use status_core::models::{
    GradedEntry, GradedPatch, GradedTable, ProgressEntry, ProgressPatch, ProgressTable,
};
use std::sync::Arc;

type ResourceState = State<Arc<ServerResources>>;
type Admin = Extension<AdminContext>;

/// Catalog routes
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create routes for every catalog table
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let (public, admin) = CatalogKind::ALL.into_iter().fold(
            (Router::new(), Router::new()),
            |(public, admin), kind| {
                let (kind_public, kind_admin) = match kind {
                    CatalogKind::Progress(table) => Self::progress_routes(table),
                    CatalogKind::Graded(table) => Self::graded_routes(table),
                };
                (public.merge(kind_public), admin.merge(kind_admin))
            },
        );

        let admin = admin.route_layer(middleware::from_fn_with_state(
            resources.clone(),
            require_admin_middleware,
        ));

        public.merge(admin).with_state(resources)
    }

    fn paths(kind: CatalogKind) -> (String, String) {
        let collection = format!("/api/{}", kind.route_segment());
        let item = format!("{collection}/:id");
        (collection, item)
    }

    fn progress_routes(
        table: ProgressTable,
    ) -> (Router<Arc<ServerResources>>, Router<Arc<ServerResources>>) {
        let kind = CatalogKind::Progress(table);
        let (collection, item) = Self::paths(kind);

        let public = Router::new()
            .route(
                &collection,
                get(move |state: ResourceState| Self::handle_list_progress(state, table)),
            )
            .route(
                &item,
                get(move |state: ResourceState, id: Path<String>| {
                    Self::handle_get_progress(state, table, id)
                }),
            );

        let admin = Router::new()
            .route(
                &collection,
                post(
                    move |state: ResourceState, admin: Admin, body: JsonBody<ProgressEntry>| {
                        Self::handle_create_progress(state, admin, table, body)
                    },
                ),
            )
            .route(
                &item,
                put(
                    move |state: ResourceState,
                          admin: Admin,
                          id: Path<String>,
                          body: JsonBody<ProgressPatch>| {
                        Self::handle_update_progress(state, admin, table, id, body)
                    },
                ),
            )
            .route(
                &item,
                delete(move |state: ResourceState, admin: Admin, id: Path<String>| {
                    Self::handle_delete(state, admin, kind, id)
                }),
            );

        (public, admin)
    }

    fn graded_routes(
        table: GradedTable,
    ) -> (Router<Arc<ServerResources>>, Router<Arc<ServerResources>>) {
        let kind = CatalogKind::Graded(table);
        let (collection, item) = Self::paths(kind);

        let public = Router::new()
            .route(
                &collection,
                get(move |state: ResourceState| Self::handle_list_graded(state, table)),
            )
            .route(
                &item,
                get(move |state: ResourceState, id: Path<String>| {
                    Self::handle_get_graded(state, table, id)
                }),
            );

        let admin = Router::new()
            .route(
                &collection,
                post(
                    move |state: ResourceState, admin: Admin, body: JsonBody<GradedEntry>| {
                        Self::handle_create_graded(state, admin, table, body)
                    },
                ),
            )
            .route(
                &item,
                put(
                    move |state: ResourceState,
                          admin: Admin,
                          id: Path<String>,
                          body: JsonBody<GradedPatch>| {
                        Self::handle_update_graded(state, admin, table, id, body)
                    },
                ),
            )
            .route(
                &item,
                delete(move |state: ResourceState, admin: Admin, id: Path<String>| {
                    Self::handle_delete(state, admin, kind, id)
                }),
            );

        (public, admin)
    }

    async fn handle_list_progress(
        State(resources): ResourceState,
        table: ProgressTable,
    ) -> Result<Response, AppError> {
        let records = resources.database.list_progress_entries(table).await?;
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    async fn handle_get_progress(
        State(resources): ResourceState,
        table: ProgressTable,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .get_progress_entry(table, &id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {id}", table.label())))?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    async fn handle_create_progress(
        State(resources): ResourceState,
        Extension(AdminContext(admin)): Admin,
        table: ProgressTable,
        JsonBody(entry): JsonBody<ProgressEntry>,
    ) -> Result<Response, AppError> {
        let record = resources.database.create_progress_entry(table, entry).await?;
        AppLogger::log_record_mutation("create", table.table_name(), &record.id, &admin.email);
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    async fn handle_update_progress(
        State(resources): ResourceState,
        Extension(AdminContext(admin)): Admin,
        table: ProgressTable,
        Path(id): Path<String>,
        JsonBody(patch): JsonBody<ProgressPatch>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .update_progress_entry(table, &id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {id}", table.label())))?;
        AppLogger::log_record_mutation("update", table.table_name(), &id, &admin.email);
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    async fn handle_list_graded(
        State(resources): ResourceState,
        table: GradedTable,
    ) -> Result<Response, AppError> {
        let records = resources.database.list_graded_entries(table).await?;
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    async fn handle_get_graded(
        State(resources): ResourceState,
        table: GradedTable,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .get_graded_entry(table, &id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {id}", table.label())))?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    async fn handle_create_graded(
        State(resources): ResourceState,
        Extension(AdminContext(admin)): Admin,
        table: GradedTable,
        JsonBody(entry): JsonBody<GradedEntry>,
    ) -> Result<Response, AppError> {
        let record = resources.database.create_graded_entry(table, entry).await?;
        AppLogger::log_record_mutation("create", table.table_name(), &record.id, &admin.email);
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    async fn handle_update_graded(
        State(resources): ResourceState,
        Extension(AdminContext(admin)): Admin,
        table: GradedTable,
        Path(id): Path<String>,
        JsonBody(patch): JsonBody<GradedPatch>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .update_graded_entry(table, &id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {id}", table.label())))?;
        AppLogger::log_record_mutation("update", table.table_name(), &id, &admin.email);
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    async fn handle_delete(
        State(resources): ResourceState,
        Extension(AdminContext(admin)): Admin,
        kind: CatalogKind,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_catalog_entry(kind, &id).await? {
            return Err(AppError::not_found(format!("{} {id}", kind.label())));
        }
        AppLogger::log_record_mutation("delete", kind.table_name(), &id, &admin.email);
        Ok((StatusCode::OK, Json(json!({ "message": "Deleted" }))).into_response())
    }
}
