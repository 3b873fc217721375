// ABOUTME: SQLite record store for the status window
// ABOUTME: Owns the connection pool and runs idempotent table migrations on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! # Database Management
//!
//! One [`Database`] handle backs every table. Each submodule adds an
//! `impl Database` block with the operations for its tables:
//!
//! - `attributes_log`: scored metric rows
//! - `experience_log`: XP awards
//! - `catalog`: articles, campaigns, projects, poetry, skills, status effects
//! - `users`: admin accounts
//! - `system_settings`: persisted secrets

mod attributes_log;
mod catalog;
mod experience_log;
mod system_settings;
mod users;

pub use catalog::CatalogKind;
pub use users::AdminUser;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Database manager for every status window table
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// `sqlite::memory:` gets a single long-lived connection so every query
    /// sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await
        } else {
            ensure_parent_dir(database_url).await?;
            // Ensure SQLite creates the database file if it doesn't exist
            let separator = if database_url.contains('?') { '&' } else { '?' };
            SqlitePoolOptions::new()
                .connect(&format!("{database_url}{separator}mode=rwc"))
                .await
        }
        .with_context(|| format!("Failed to connect to {database_url}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready");

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE` statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_attributes_log().await?;
        self.migrate_experience_log().await?;
        self.migrate_catalog().await?;
        self.migrate_users().await?;
        self.migrate_system_secrets().await?;

        debug!("Migrations complete");
        Ok(())
    }
}

/// Create the directory holding a file-backed database
async fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let path = database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Current time at the precision timestamps are stored with
pub(crate) fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored RFC 3339 timestamp, falling back to now for legacy rows
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
