// ABOUTME: Central admin authorization guard for routes that mutate records
// ABOUTME: Validates the bearer JWT and returns 401 or 403 before the handler runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Admin Authorization Guard
//!
//! Write routes are wrapped with [`require_admin_middleware`]:
//!
//! ```rust,no_run
//! use axum::{middleware, routing::post, Router};
//! use status_window::middleware::require_admin_middleware;
//! use status_window::resources::ServerResources;
//! use std::sync::Arc;
//!
//! # async fn handler() -> &'static str { "" }
//! # fn example(resources: Arc<ServerResources>) {
//! let app: Router<Arc<ServerResources>> = Router::new()
//!     .route("/api/articles", post(handler))
//!     .layer(middleware::from_fn_with_state(resources, require_admin_middleware));
//! # }
//! ```
//!
//! On success the validated claims are inserted into the request
//! extensions as an [`AdminContext`].

use crate::auth::{AuthManager, Claims};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use std::sync::Arc;
use tracing::Span;

/// Claims of the admin making the request
#[derive(Debug, Clone)]
pub struct AdminContext(pub Claims);

/// Token from an `Authorization: Bearer <token>` header
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Validate the bearer token, whatever the user's role
///
/// # Errors
///
/// - `AUTH_REQUIRED` when no bearer token is present
/// - `AUTH_INVALID` or `AUTH_EXPIRED` when validation fails
pub fn authenticate(auth_manager: &AuthManager, headers: &HeaderMap) -> AppResult<Claims> {
    let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;
    Ok(auth_manager.validate_token(token)?)
}

/// Validate the bearer token and require the admin flag
///
/// # Errors
///
/// Everything [`authenticate`] rejects, plus `PERMISSION_DENIED` for
/// non-admin users
pub fn require_admin(auth_manager: &AuthManager, headers: &HeaderMap) -> AppResult<Claims> {
    let claims = authenticate(auth_manager, headers)?;
    if !claims.is_admin {
        AppLogger::log_auth_event(&claims.email, "admin_write", false, Some("not an admin"));
        return Err(AppError::permission_denied());
    }
    Ok(claims)
}

/// Reject requests without a valid admin token
pub async fn require_admin_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    match require_admin(&resources.auth_manager, req.headers()) {
        Ok(claims) => {
            Span::current().record("admin_email", claims.email.as_str());
            req.extensions_mut().insert(AdminContext(claims));
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_missing_token_requires_auth() {
        let manager = AuthManager::new(b"secret", 1);
        let err = require_admin(&manager, &HeaderMap::new()).unwrap_err();
        assert_eq!(err.http_status(), 401);
    }
}
