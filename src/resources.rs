// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, auth manager, configuration, and level curve behind one Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::auth::{resolve_jwt_secret, AuthManager};
use crate::config::ServerConfig;
use crate::database::Database;
use anyhow::{Context, Result};
use status_core::models::PersonalConstants;
use status_engine::LevelCurve;
use std::sync::Arc;

/// Everything a handler needs, created once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Record store
    pub database: Arc<Database>,
    /// Token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// Validated configuration
    pub config: Arc<ServerConfig>,
    /// XP curve built from `xp_per_level`
    pub level_curve: LevelCurve,
}

impl ServerResources {
    /// Assemble resources from parts that are already built
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        config: ServerConfig,
        level_curve: LevelCurve,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
            level_curve,
        }
    }

    /// Connect the database, resolve the JWT secret, and build the curve
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, the secret cannot
    /// be loaded, or `xp_per_level` is invalid
    pub async fn initialize(config: ServerConfig) -> Result<Self> {
        let database = Database::new(&config.database.to_connection_string()).await?;
        let secret = resolve_jwt_secret(&config.auth, &database)
            .await
            .context("Failed to load JWT secret")?;
        let auth_manager = AuthManager::new(secret.as_bytes(), config.auth.jwt_expiry_hours);
        let level_curve = LevelCurve::new(config.xp_per_level)?;

        Ok(Self::new(database, auth_manager, config, level_curve))
    }

    /// Personal constants used by the score engine
    #[must_use]
    pub fn profile(&self) -> &PersonalConstants {
        &self.config.profile
    }
}
