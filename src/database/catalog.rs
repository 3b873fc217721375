// ABOUTME: Catalog storage for articles, campaigns, projects, poetry, skills, and status effects
// ABOUTME: Six tables share two row shapes, selected at runtime by CatalogKind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{format_timestamp, now_micros, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use status_core::models::{
    GradedEntry, GradedPatch, GradedTable, Patch, ProgressEntry, ProgressPatch, ProgressTable,
    Record,
};
use std::fmt;
use uuid::Uuid;

/// Any catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Article, campaign, project, or poetry table
    Progress(ProgressTable),
    /// Skills or status effects table
    Graded(GradedTable),
}

impl CatalogKind {
    /// Every catalog table, progress tables first
    pub const ALL: [Self; 6] = [
        Self::Progress(ProgressTable::Articles),
        Self::Progress(ProgressTable::Campaigns),
        Self::Progress(ProgressTable::Projects),
        Self::Progress(ProgressTable::Poetry),
        Self::Graded(GradedTable::Skills),
        Self::Graded(GradedTable::StatusEffects),
    ];

    /// Backing table name
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Progress(table) => table.table_name(),
            Self::Graded(table) => table.table_name(),
        }
    }

    /// URL path segment under `/api`
    #[must_use]
    pub const fn route_segment(self) -> &'static str {
        match self {
            Self::Progress(table) => table.route_segment(),
            Self::Graded(table) => table.route_segment(),
        }
    }

    /// Singular label for messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Progress(table) => table.label(),
            Self::Graded(table) => table.label(),
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

fn require_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::invalid_input("name must not be empty"));
    }
    Ok(())
}

const fn progress_select(table: ProgressTable) -> &'static str {
    if table.has_link() {
        "id, name, description, link, progress, created_at, updated_at"
    } else {
        "id, name, description, NULL AS link, progress, created_at, updated_at"
    }
}

impl Database {
    pub(super) async fn migrate_catalog(&self) -> Result<()> {
        for table in ProgressTable::ALL {
            let link_column = if table.has_link() { "link TEXT," } else { "" };
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {name} (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT,
                    {link_column}
                    progress REAL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                ",
                name = table.table_name(),
            ))
            .execute(&self.pool)
            .await?;
        }

        for table in GradedTable::ALL {
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {name} (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT,
                    grade TEXT,
                    attribute_affected TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                ",
                name = table.table_name(),
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Insert an article, campaign, project, or poem
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails
    pub async fn create_progress_entry(
        &self,
        table: ProgressTable,
        entry: ProgressEntry,
    ) -> AppResult<Record<ProgressEntry>> {
        require_name(&entry.name)?;
        let now = now_micros();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields: entry.for_table(table),
            created_at: now,
            updated_at: now,
        };

        let sql = if table.has_link() {
            format!(
                "INSERT INTO {} (id, name, description, link, progress, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                table.table_name()
            )
        } else {
            format!(
                "INSERT INTO {} (id, name, description, progress, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?5, ?6, ?6)",
                table.table_name()
            )
        };

        sqlx::query(&sql)
            .bind(&record.id)
            .bind(&record.fields.name)
            .bind(&record.fields.description)
            .bind(&record.fields.link)
            .bind(record.fields.progress)
            .bind(format_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to create {}: {e}", table.label()))
            })?;

        Ok(record)
    }

    /// Get one progress entry
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_progress_entry(
        &self,
        table: ProgressTable,
        id: &str,
    ) -> AppResult<Option<Record<ProgressEntry>>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM {} WHERE id = ?1",
            progress_select(table),
            table.table_name()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get {}: {e}", table.label())))?;

        Ok(row.as_ref().map(row_to_progress))
    }

    /// Every entry in a progress table, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_progress_entries(
        &self,
        table: ProgressTable,
    ) -> AppResult<Vec<Record<ProgressEntry>>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM {} ORDER BY created_at, rowid",
            progress_select(table),
            table.table_name()
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list {}: {e}", table.table_name())))?;

        Ok(rows.iter().map(row_to_progress).collect())
    }

    /// Apply a partial update; `None` when the entry does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the new name is blank or the update fails
    pub async fn update_progress_entry(
        &self,
        table: ProgressTable,
        id: &str,
        patch: ProgressPatch,
    ) -> AppResult<Option<Record<ProgressEntry>>> {
        let Some(mut record) = self.get_progress_entry(table, id).await? else {
            return Ok(None);
        };
        record.fields.apply(patch);
        require_name(&record.fields.name)?;
        record.fields = record.fields.for_table(table);
        record.updated_at = now_micros();

        let sql = if table.has_link() {
            format!(
                "UPDATE {} SET name = ?2, description = ?3, link = ?4, progress = ?5, \
                 updated_at = ?6 WHERE id = ?1",
                table.table_name()
            )
        } else {
            format!(
                "UPDATE {} SET name = ?2, description = ?3, progress = ?5, \
                 updated_at = ?6 WHERE id = ?1",
                table.table_name()
            )
        };

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&record.fields.name)
            .bind(&record.fields.description)
            .bind(&record.fields.link)
            .bind(record.fields.progress)
            .bind(format_timestamp(record.updated_at))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to update {}: {e}", table.label()))
            })?;

        Ok((result.rows_affected() > 0).then_some(record))
    }

    /// Insert a skill or status effect
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails
    pub async fn create_graded_entry(
        &self,
        table: GradedTable,
        entry: GradedEntry,
    ) -> AppResult<Record<GradedEntry>> {
        require_name(&entry.name)?;
        let now = now_micros();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields: entry,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO {} (id, name, description, grade, attribute_affected, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            table.table_name()
        ))
        .bind(&record.id)
        .bind(&record.fields.name)
        .bind(&record.fields.description)
        .bind(&record.fields.grade)
        .bind(&record.fields.attribute_affected)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create {}: {e}", table.label())))?;

        Ok(record)
    }

    /// Get one graded entry
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_graded_entry(
        &self,
        table: GradedTable,
        id: &str,
    ) -> AppResult<Option<Record<GradedEntry>>> {
        let row = sqlx::query(&format!(
            "SELECT id, name, description, grade, attribute_affected, created_at, updated_at \
             FROM {} WHERE id = ?1",
            table.table_name()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get {}: {e}", table.label())))?;

        Ok(row.as_ref().map(row_to_graded))
    }

    /// Every entry in a graded table, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_graded_entries(
        &self,
        table: GradedTable,
    ) -> AppResult<Vec<Record<GradedEntry>>> {
        let rows = sqlx::query(&format!(
            "SELECT id, name, description, grade, attribute_affected, created_at, updated_at \
             FROM {} ORDER BY created_at, rowid",
            table.table_name()
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list {}: {e}", table.table_name())))?;

        Ok(rows.iter().map(row_to_graded).collect())
    }

    /// Apply a partial update; `None` when the entry does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the new name is blank or the update fails
    pub async fn update_graded_entry(
        &self,
        table: GradedTable,
        id: &str,
        patch: GradedPatch,
    ) -> AppResult<Option<Record<GradedEntry>>> {
        let Some(mut record) = self.get_graded_entry(table, id).await? else {
            return Ok(None);
        };
        record.fields.apply(patch);
        require_name(&record.fields.name)?;
        record.updated_at = now_micros();

        let result = sqlx::query(&format!(
            "UPDATE {} SET name = ?2, description = ?3, grade = ?4, attribute_affected = ?5, \
             updated_at = ?6 WHERE id = ?1",
            table.table_name()
        ))
        .bind(id)
        .bind(&record.fields.name)
        .bind(&record.fields.description)
        .bind(&record.fields.grade)
        .bind(&record.fields.attribute_affected)
        .bind(format_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update {}: {e}", table.label())))?;

        Ok((result.rows_affected() > 0).then_some(record))
    }

    /// Delete from any catalog table; `false` when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_catalog_entry(&self, kind: CatalogKind, id: &str) -> AppResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", kind.table_name()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete {}: {e}", kind.label())))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_progress(row: &SqliteRow) -> Record<ProgressEntry> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Record {
        id: row.get("id"),
        fields: ProgressEntry {
            name: row.get("name"),
            description: row.get("description"),
            link: row.get("link"),
            progress: row.get("progress"),
        },
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    }
}

fn row_to_graded(row: &SqliteRow) -> Record<GradedEntry> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Record {
        id: row.get("id"),
        fields: GradedEntry {
            name: row.get("name"),
            description: row.get("description"),
            grade: row.get("grade"),
            attribute_affected: row.get("attribute_affected"),
        },
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaigns_select_null_link() {
        assert!(progress_select(ProgressTable::Campaigns).contains("NULL AS link"));
        assert!(!progress_select(ProgressTable::Articles).contains("NULL"));
    }
}
