// ABOUTME: Record models shared by the record store, the engines, and the routes
// ABOUTME: Defines the generic stored-record envelope and re-exports per-table shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Record models.
//!
//! Every table stores a payload type (`AttributeLog`, `ExperienceEntry`,
//! `ProgressEntry`, `GradedEntry`) wrapped in a [`Record`] that carries the
//! identifier and timestamps. The payload is flattened on the wire, so a
//! stored article serializes as `{"id": ..., "name": ..., "created_at": ...}`.

mod attribute_log;
mod catalog;
mod experience_log;
mod profile;

pub use attribute_log::AttributeLog;
pub use catalog::{GradedEntry, GradedPatch, GradedTable, ProgressEntry, ProgressPatch, ProgressTable};
pub use experience_log::ExperienceEntry;
pub use profile::PersonalConstants;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored row: identifier, timestamps, and the table payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// UUID v4 identifier
    pub id: String,
    /// Table-specific payload
    #[serde(flatten)]
    pub fields: T,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl<T> Record<T> {
    /// Discard the envelope and keep the payload
    pub fn into_fields(self) -> T {
        self.fields
    }
}

/// Partial update semantics: present fields overwrite, absent fields are kept
pub trait Patch<P> {
    /// Apply `patch` on top of `self`
    fn apply(&mut self, patch: P);
}

/// Overwrite `slot` when `value` is present
pub(crate) fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
