// ABOUTME: Experience log storage operations
// ABOUTME: CRUD for dated XP awards feeding the level curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{format_timestamp, now_micros, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use status_core::models::{ExperienceEntry, Patch, Record};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_experience_log(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS experience_log (
                id TEXT PRIMARY KEY,
                category TEXT,
                date TEXT,
                description TEXT,
                experience REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record an experience award
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_experience(
        &self,
        entry: ExperienceEntry,
    ) -> AppResult<Record<ExperienceEntry>> {
        let now = now_micros();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields: entry,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO experience_log
                (id, category, date, description, experience, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ",
        )
        .bind(&record.id)
        .bind(&record.fields.category)
        .bind(record.fields.date.map(format_timestamp))
        .bind(&record.fields.description)
        .bind(record.fields.experience)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create experience entry: {e}")))?;

        Ok(record)
    }

    /// Get one experience award
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_experience(&self, id: &str) -> AppResult<Option<Record<ExperienceEntry>>> {
        let row = sqlx::query(
            r"
            SELECT id, category, date, description, experience, created_at, updated_at
            FROM experience_log
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get experience entry: {e}")))?;

        Ok(row.as_ref().map(row_to_experience))
    }

    /// Every award, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_experience(&self) -> AppResult<Vec<Record<ExperienceEntry>>> {
        let rows = sqlx::query(
            r"
            SELECT id, category, date, description, experience, created_at, updated_at
            FROM experience_log
            ORDER BY created_at, rowid
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list experience log: {e}")))?;

        Ok(rows.iter().map(row_to_experience).collect())
    }

    /// Apply a partial update; `None` when the award does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the update fails
    pub async fn update_experience(
        &self,
        id: &str,
        patch: ExperienceEntry,
    ) -> AppResult<Option<Record<ExperienceEntry>>> {
        let Some(mut record) = self.get_experience(id).await? else {
            return Ok(None);
        };
        record.fields.apply(patch);
        record.updated_at = now_micros();

        let result = sqlx::query(
            r"
            UPDATE experience_log
            SET category = ?2, date = ?3, description = ?4, experience = ?5, updated_at = ?6
            WHERE id = ?1
            ",
        )
        .bind(id)
        .bind(&record.fields.category)
        .bind(record.fields.date.map(format_timestamp))
        .bind(&record.fields.description)
        .bind(record.fields.experience)
        .bind(format_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update experience entry: {e}")))?;

        Ok((result.rows_affected() > 0).then_some(record))
    }

    /// Delete one award; `false` when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_experience(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM experience_log WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete experience entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_experience(row: &SqliteRow) -> Record<ExperienceEntry> {
    let date: Option<String> = row.get("date");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Record {
        id: row.get("id"),
        fields: ExperienceEntry {
            category: row.get("category"),
            date: date.as_deref().map(parse_timestamp),
            description: row.get("description"),
            experience: row.get("experience"),
        },
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    }
}
