// ABOUTME: Attribute log storage operations
// ABOUTME: CRUD for scored metric rows plus the case-insensitive per-attribute query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{format_timestamp, now_micros, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use status_core::models::{AttributeLog, Patch, Record};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "id, attribute, metric, value, baseline, weightage, notes, created_at, updated_at";

impl Database {
    pub(super) async fn migrate_attributes_log(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS attributes_log (
                id TEXT PRIMARY KEY,
                attribute TEXT,
                metric TEXT,
                value REAL,
                baseline REAL,
                weightage REAL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_attributes_log_attribute ON attributes_log(attribute)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert an attribute log row; the attribute name is stored lowercase
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_attribute_log(&self, row: AttributeLog) -> AppResult<Record<AttributeLog>> {
        let now = now_micros();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields: row.normalized(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO attributes_log
                (id, attribute, metric, value, baseline, weightage, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            ",
        )
        .bind(&record.id)
        .bind(&record.fields.attribute)
        .bind(&record.fields.metric)
        .bind(record.fields.value)
        .bind(record.fields.baseline)
        .bind(record.fields.weightage)
        .bind(&record.fields.notes)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create attribute log: {e}")))?;

        Ok(record)
    }

    /// Get one attribute log row
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_attribute_log(&self, id: &str) -> AppResult<Option<Record<AttributeLog>>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM attributes_log WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get attribute log: {e}")))?;

        Ok(row.as_ref().map(row_to_attribute_log))
    }

    /// List every attribute log row, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_attribute_logs(&self) -> AppResult<Vec<Record<AttributeLog>>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM attributes_log ORDER BY created_at, rowid"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list attribute logs: {e}")))?;

        Ok(rows.iter().map(row_to_attribute_log).collect())
    }

    /// Rows whose attribute equals `attribute`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_attribute_logs_for(
        &self,
        attribute: &str,
    ) -> AppResult<Vec<Record<AttributeLog>>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM attributes_log \
             WHERE lower(attribute) = lower(?1) ORDER BY created_at, rowid"
        ))
        .bind(attribute.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to list attribute logs for {attribute}: {e}"))
        })?;

        Ok(rows.iter().map(row_to_attribute_log).collect())
    }

    /// Apply a partial update; `None` when the row does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the update fails
    pub async fn update_attribute_log(
        &self,
        id: &str,
        patch: AttributeLog,
    ) -> AppResult<Option<Record<AttributeLog>>> {
        let Some(mut record) = self.get_attribute_log(id).await? else {
            return Ok(None);
        };
        record.fields.apply(patch);
        record.fields = record.fields.normalized();
        record.updated_at = now_micros();

        let result = sqlx::query(
            r"
            UPDATE attributes_log
            SET attribute = ?2, metric = ?3, value = ?4, baseline = ?5,
                weightage = ?6, notes = ?7, updated_at = ?8
            WHERE id = ?1
            ",
        )
        .bind(id)
        .bind(&record.fields.attribute)
        .bind(&record.fields.metric)
        .bind(record.fields.value)
        .bind(record.fields.baseline)
        .bind(record.fields.weightage)
        .bind(&record.fields.notes)
        .bind(format_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update attribute log: {e}")))?;

        Ok((result.rows_affected() > 0).then_some(record))
    }

    /// Delete one row; `false` when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_attribute_log(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attributes_log WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete attribute log: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_attribute_log(row: &SqliteRow) -> Record<AttributeLog> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Record {
        id: row.get("id"),
        fields: AttributeLog {
            attribute: row.get("attribute"),
            metric: row.get("metric"),
            value: row.get("value"),
            baseline: row.get("baseline"),
            weightage: row.get("weightage"),
            notes: row.get("notes"),
        },
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    }
}
