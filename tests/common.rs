// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, server resources, and admin token helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `status_window`

use anyhow::Result;
use axum::Router;
use status_window::auth::{generate_jwt_secret, AuthManager};
use status_window::config::environment::{DatabaseUrl, ServerConfig};
use status_window::database::{AdminUser, Database};
use status_window::resources::ServerResources;
use status_window::server::build_router;
use status_engine::LevelCurve;
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Placeholder hash for users that never log in through the password flow
const UNUSED_PASSWORD_HASH: &str = "$2b$04$unusedunusedunusedunuseduOZ6nq9L8a0Y8hK3gQyZ9x4Q1m7bW";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(&generate_jwt_secret(), 24)
}

/// Defaults with an in-memory database
pub fn create_test_config() -> Result<ServerConfig> {
    let mut config = ServerConfig::from_lookup(|_| None)?;
    config.database = DatabaseUrl::Memory;
    Ok(config)
}

/// Server resources backed by a fresh in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = create_test_config()?;
    let curve = LevelCurve::new(config.xp_per_level)?;
    Ok(Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
        config,
        curve,
    )))
}

/// Full application router over `resources`
pub fn create_test_app(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// Insert a user without a usable password
pub async fn create_test_user(
    resources: &ServerResources,
    email: &str,
    is_admin: bool,
) -> Result<AdminUser> {
    Ok(resources
        .database
        .upsert_admin_user(email, UNUSED_PASSWORD_HASH, is_admin)
        .await?)
}

/// Insert an admin and return a bearer token for it
pub async fn create_admin_token(resources: &ServerResources) -> Result<String> {
    let user = create_test_user(resources, "admin@example.com", true).await?;
    Ok(resources.auth_manager.generate_token(&user)?.token)
}

/// Insert a read-only user and return a bearer token for it
pub async fn create_viewer_token(resources: &ServerResources) -> Result<String> {
    let user = create_test_user(resources, "viewer@example.com", false).await?;
    Ok(resources.auth_manager.generate_token(&user)?.token)
}

/// `Authorization` header value for `token`
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
