// ABOUTME: Admin user storage for the write surface
// ABOUTME: Stores bcrypt password hashes keyed by unique email with login bookkeeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{format_timestamp, now_micros, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// An account allowed to sign in to the admin surface
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    /// UUID v4 identifier
    pub id: String,
    /// Login email, unique
    pub email: String,
    /// bcrypt hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may mutate records
    pub is_admin: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Most recent successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl Database {
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS admin_users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                is_admin BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_login TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_admin_users_email ON admin_users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create the user, or replace the hash and flag of an existing email
    ///
    /// # Errors
    ///
    /// Returns an error if the email is blank or the upsert fails
    pub async fn upsert_admin_user(
        &self,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> AppResult<AdminUser> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::missing_field("email"));
        }

        sqlx::query(
            r"
            INSERT INTO admin_users (id, email, password_hash, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(email) DO UPDATE SET
                password_hash = excluded.password_hash,
                is_admin = excluded.is_admin
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&email)
        .bind(password_hash)
        .bind(is_admin)
        .bind(format_timestamp(now_micros()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save admin user: {e}")))?;

        self.get_admin_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::internal(format!("Admin user {email} vanished after save")))
    }

    /// Look up a user by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_admin_user_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, is_admin, created_at, last_login
            FROM admin_users
            WHERE email = lower(?1)
            ",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get admin user: {e}")))?;

        Ok(row.as_ref().map(row_to_admin_user))
    }

    /// Every account, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_admin_users(&self) -> AppResult<Vec<AdminUser>> {
        let rows = sqlx::query(
            r"
            SELECT id, email, password_hash, is_admin, created_at, last_login
            FROM admin_users
            ORDER BY created_at
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list admin users: {e}")))?;

        Ok(rows.iter().map(row_to_admin_user).collect())
    }

    /// Stamp a successful login
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn record_admin_login(&self, id: &str) -> AppResult<()> {
        sqlx::query("UPDATE admin_users SET last_login = ?2 WHERE id = ?1")
            .bind(id)
            .bind(format_timestamp(now_micros()))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to record admin login: {e}")))?;

        Ok(())
    }
}

fn row_to_admin_user(row: &SqliteRow) -> AdminUser {
    let created_at: String = row.get("created_at");
    let last_login: Option<String> = row.get("last_login");

    AdminUser {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_admin: row.get("is_admin"),
        created_at: parse_timestamp(&created_at),
        last_login: last_login.as_deref().map(parse_timestamp),
    }
}
