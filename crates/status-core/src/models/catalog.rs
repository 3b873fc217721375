// ABOUTME: Catalog record models for articles, campaigns, projects, poetry, skills, and status effects
// ABOUTME: Two shapes cover six tables: progress-tracked entries and graded entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{overwrite, Patch};
use crate::constants::tables;
use serde::{Deserialize, Serialize};

/// Tables whose rows track progress toward completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressTable {
    /// Written articles
    Articles,
    /// Long-running campaigns (no link column)
    Campaigns,
    /// Projects
    Projects,
    /// Poems
    Poetry,
}

impl ProgressTable {
    /// Every progress table
    pub const ALL: [Self; 4] = [Self::Articles, Self::Campaigns, Self::Projects, Self::Poetry];

    /// Backing table name
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Articles => tables::ARTICLES,
            Self::Campaigns => tables::CAMPAIGNS,
            Self::Projects => tables::PROJECTS,
            Self::Poetry => tables::POETRY,
        }
    }

    /// URL path segment under `/api`
    #[must_use]
    pub const fn route_segment(self) -> &'static str {
        self.table_name()
    }

    /// Singular label used in error messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Articles => "Article",
            Self::Campaigns => "Campaign",
            Self::Projects => "Project",
            Self::Poetry => "Poem",
        }
    }

    /// Whether rows carry a `link`
    #[must_use]
    pub const fn has_link(self) -> bool {
        !matches!(self, Self::Campaigns)
    }
}

/// Tables whose rows carry a grade and the attribute they affect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradedTable {
    /// Learned skills
    Skills,
    /// Active status effects
    StatusEffects,
}

impl GradedTable {
    /// Every graded table
    pub const ALL: [Self; 2] = [Self::Skills, Self::StatusEffects];

    /// Backing table name
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Skills => tables::SKILLS,
            Self::StatusEffects => tables::STATUS_EFFECTS,
        }
    }

    /// URL path segment under `/api`
    #[must_use]
    pub const fn route_segment(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::StatusEffects => "status-effects",
        }
    }

    /// Singular label used in error messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Skills => "Skill",
            Self::StatusEffects => "Status effect",
        }
    }
}

/// Article, campaign, project, or poem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Title
    pub name: String,
    /// Summary
    #[serde(default)]
    pub description: Option<String>,
    /// External URL; always `None` for campaigns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Completion, usually 0-100
    #[serde(default)]
    pub progress: Option<f64>,
}

impl ProgressEntry {
    /// Entry with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            link: None,
            progress: None,
        }
    }

    /// Drop fields the table does not store
    #[must_use]
    pub fn for_table(mut self, table: ProgressTable) -> Self {
        if !table.has_link() {
            self.link = None;
        }
        self
    }
}

/// Partial update for a [`ProgressEntry`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressPatch {
    /// New title
    #[serde(default)]
    pub name: Option<String>,
    /// New summary
    #[serde(default)]
    pub description: Option<String>,
    /// New URL
    #[serde(default)]
    pub link: Option<String>,
    /// New completion
    #[serde(default)]
    pub progress: Option<f64>,
}

impl Patch<ProgressPatch> for ProgressEntry {
    fn apply(&mut self, patch: ProgressPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.link, patch.link);
        overwrite(&mut self.progress, patch.progress);
    }
}

/// Skill or status effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedEntry {
    /// Title
    pub name: String,
    /// Summary
    #[serde(default)]
    pub description: Option<String>,
    /// Letter or rank, e.g. `S` or `B+`
    #[serde(default)]
    pub grade: Option<String>,
    /// Attribute this entry influences
    #[serde(default, rename = "attribute affected")]
    pub attribute_affected: Option<String>,
}

impl GradedEntry {
    /// Entry with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            grade: None,
            attribute_affected: None,
        }
    }
}

/// Partial update for a [`GradedEntry`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedPatch {
    /// New title
    #[serde(default)]
    pub name: Option<String>,
    /// New summary
    #[serde(default)]
    pub description: Option<String>,
    /// New grade
    #[serde(default)]
    pub grade: Option<String>,
    /// New affected attribute
    #[serde(default, rename = "attribute affected")]
    pub attribute_affected: Option<String>,
}

impl Patch<GradedPatch> for GradedEntry {
    fn apply(&mut self, patch: GradedPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.grade, patch.grade);
        overwrite(&mut self.attribute_affected, patch.attribute_affected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_segments() {
        assert_eq!(ProgressTable::Poetry.route_segment(), "poetry");
        assert_eq!(GradedTable::StatusEffects.route_segment(), "status-effects");
        assert_eq!(GradedTable::StatusEffects.table_name(), "status_effects");
    }

    #[test]
    fn test_campaigns_drop_link() {
        let entry = ProgressEntry {
            link: Some("https://example.com".to_owned()),
            ..ProgressEntry::named("Marathon block")
        };
        assert!(entry.clone().for_table(ProgressTable::Campaigns).link.is_none());
        assert!(entry.for_table(ProgressTable::Articles).link.is_some());
    }

    #[test]
    fn test_graded_entry_uses_spaced_wire_name() {
        let entry: GradedEntry = serde_json::from_str(
            r#"{"name":"Iron Will","grade":"A","attribute affected":"resilience"}"#,
        )
        .unwrap();
        assert_eq!(entry.attribute_affected.as_deref(), Some("resilience"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["attribute affected"], "resilience");
    }

    #[test]
    fn test_progress_patch_renames() {
        let mut entry = ProgressEntry::named("Draft");
        entry.apply(ProgressPatch {
            name: Some("Published".to_owned()),
            progress: Some(100.0),
            ..ProgressPatch::default()
        });
        assert_eq!(entry.name, "Published");
        assert_eq!(entry.progress, Some(100.0));
    }
}
