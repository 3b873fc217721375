// ABOUTME: Experience log row model consumed by the experience engine
// ABOUTME: One dated award of experience points under a category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{overwrite, Patch};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

/// An experience award
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Free-form grouping, e.g. `fitness` or `writing`
    #[serde(default)]
    pub category: Option<String>,
    /// When the experience was earned
    #[serde(default, deserialize_with = "deserialize_flexible_date")]
    pub date: Option<DateTime<Utc>>,
    /// What was done
    #[serde(default)]
    pub description: Option<String>,
    /// Experience points awarded; missing counts as zero
    #[serde(default)]
    pub experience: Option<f64>,
}

impl ExperienceEntry {
    /// Entry with only an experience amount
    #[must_use]
    pub fn points(experience: f64) -> Self {
        Self {
            experience: Some(experience),
            ..Self::default()
        }
    }
}

impl Patch<Self> for ExperienceEntry {
    fn apply(&mut self, patch: Self) {
        overwrite(&mut self.category, patch.category);
        overwrite(&mut self.date, patch.date);
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.experience, patch.experience);
    }
}

/// Accept RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| DeError::custom(format!("invalid date: {raw}")))
}
