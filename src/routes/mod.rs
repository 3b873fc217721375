// ABOUTME: Route module organization for the Status Window HTTP endpoints
// ABOUTME: Groups routes by domain; each module owns its paths and thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Route module for the Status Window service
//!
//! Each domain module exposes a `XRoutes::routes(resources)` constructor that
//! returns a stateless `Router`. Handlers delegate to the record store and the
//! status service; write routes are wrapped with the admin guard inside their
//! own module.

/// Attribute log reads and admin writes
pub mod attributes;
/// Admin login and session routes
pub mod auth;
/// Article, campaign, project, poetry, skill, and status effect routes
pub mod catalog;
/// Level summaries and experience log routes
pub mod experience;
/// Health check and readiness routes
pub mod health;
/// Attribute stats and the dashboard overview
pub mod stats;

use crate::errors::AppError;
use axum::extract::FromRequest;
use axum::Json;

/// JSON request body that rejects with the service's `{"error": ...}` shape
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

pub use attributes::AttributeLogRoutes;
pub use auth::{AuthRoutes, LoginRequest, LoginResponse, SessionResponse, SessionUser};
pub use catalog::CatalogRoutes;
pub use experience::ExperienceRoutes;
pub use health::HealthRoutes;
pub use stats::StatsRoutes;
