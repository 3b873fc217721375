// ABOUTME: Admin authentication routes: password login and session introspection
// ABOUTME: Verifies bcrypt credentials and issues HS256 session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::auth::{dummy_password_hash, verify_password};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::authenticate;
use crate::resources::ServerResources;
use crate::routes::JsonBody;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// User info returned with a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    /// Admin email
    pub email: String,
    /// Whether writes are allowed
    pub is_admin: bool,
}

/// Login response with token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for admin requests
    pub token: String,
    /// When the token stops validating
    pub expires_at: DateTime<Utc>,
    /// Who signed in
    pub user: SessionUser,
}

/// Current session, derived from the bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Admin email
    pub email: String,
    /// Whether writes are allowed
    pub is_admin: bool,
    /// When the token stops validating
    pub expires_at: DateTime<Utc>,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/session", get(Self::handle_session))
            .with_state(resources)
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let invalid = || AppError::auth_invalid("Invalid email or password");

        let user = resources
            .database
            .get_admin_user_by_email(&request.email)
            .await?;

        // Unknown emails verify against a dummy hash; bcrypt runs on the blocking pool
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = request.password;
        let verified = task::spawn_blocking(move || {
            let password_hash = stored_hash.as_deref().unwrap_or_else(|| dummy_password_hash());
            verify_password(&password, password_hash)
        })
        .await
        .map_err(|e| AppError::internal(format!("Password check failed: {e}")))?;

        let Some(user) = user else {
            AppLogger::log_auth_event(&request.email, "login", false, Some("unknown email"));
            return Err(invalid());
        };
        if !verified {
            AppLogger::log_auth_event(&user.email, "login", false, Some("bad password"));
            return Err(invalid());
        }

        let issued = resources.auth_manager.generate_token(&user)?;
        resources.database.record_admin_login(&user.id).await?;
        AppLogger::log_auth_event(&user.email, "login", true, None);

        let response = LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: SessionUser {
                email: user.email,
                is_admin: user.is_admin,
            },
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/auth/session
    async fn handle_session(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let claims = authenticate(&resources.auth_manager, &headers)?;
        let response = SessionResponse {
            expires_at: claims.expires_at(),
            email: claims.email,
            is_admin: claims.is_admin,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
