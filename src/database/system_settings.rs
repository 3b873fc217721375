// ABOUTME: System secret storage for values generated once and reused across restarts
// ABOUTME: Holds the JWT signing secret when none is supplied by the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{format_timestamp, now_micros, Database};
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use sqlx::Row;
use tracing::info;

impl Database {
    pub(super) async fn migrate_system_secrets(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS system_secrets (
                secret_type TEXT PRIMARY KEY,
                secret_value TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a stored secret by type
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_system_secret(&self, secret_type: &str) -> AppResult<Option<String>> {
        let row = sqlx::query("SELECT secret_value FROM system_secrets WHERE secret_type = ?1")
            .bind(secret_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get system secret: {e}")))?;

        Ok(row.map(|row| row.get("secret_value")))
    }

    /// Return the stored secret, generating and saving one on first use
    ///
    /// Concurrent first callers race on the insert; `INSERT OR IGNORE` keeps
    /// the first value and every caller re-reads it.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the insert fails
    pub async fn get_or_create_system_secret<F>(
        &self,
        secret_type: &str,
        generate: F,
    ) -> AppResult<String>
    where
        F: FnOnce() -> String,
    {
        if let Some(existing) = self.get_system_secret(secret_type).await? {
            return Ok(existing);
        }

        sqlx::query(
            r"
            INSERT OR IGNORE INTO system_secrets (secret_type, secret_value, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(secret_type)
        .bind(generate())
        .bind(format_timestamp(now_micros()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store system secret: {e}")))?;

        info!(secret.kind = %secret_type, "Generated new system secret");

        self.get_system_secret(secret_type)
            .await?
            .ok_or_else(|| AppError::internal(format!("System secret {secret_type} not stored")))
    }
}
