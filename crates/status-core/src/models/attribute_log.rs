// ABOUTME: Attribute log row model consumed by the score engine
// ABOUTME: One logged measurement of a named metric under an attribute category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use super::{overwrite, Patch};
use serde::{Deserialize, Serialize};

/// A logged attribute measurement
///
/// Every field is optional because the admin surface accepts sparse rows;
/// the score engine substitutes defaults where a formula needs a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeLog {
    /// Lowercase attribute category, e.g. `strength`
    #[serde(default)]
    pub attribute: Option<String>,
    /// Named sub-measurement, e.g. `Bench Press (Kg)`
    #[serde(default)]
    pub metric: Option<String>,
    /// Measured value
    #[serde(default)]
    pub value: Option<f64>,
    /// Reference value for ratio scoring
    #[serde(default)]
    pub baseline: Option<f64>,
    /// Linear multiplier for weighted metrics
    #[serde(default)]
    pub weightage: Option<f64>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttributeLog {
    /// Start a row for `attribute` / `metric` with a value
    #[must_use]
    pub fn new(attribute: &str, metric: &str, value: f64) -> Self {
        Self {
            attribute: Some(attribute.to_owned()),
            metric: Some(metric.to_owned()),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Set the baseline
    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Set the weightage
    #[must_use]
    pub fn with_weightage(mut self, weightage: f64) -> Self {
        self.weightage = Some(weightage);
        self
    }

    /// Store attribute names trimmed and lowercase
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.attribute = self
            .attribute
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty());
        self
    }

    /// Case-insensitive attribute match
    #[must_use]
    pub fn belongs_to(&self, attribute: &str) -> bool {
        self.attribute
            .as_deref()
            .is_some_and(|a| a.trim().eq_ignore_ascii_case(attribute.trim()))
    }
}

impl Patch<Self> for AttributeLog {
    fn apply(&mut self, patch: Self) {
        overwrite(&mut self.attribute, patch.attribute);
        overwrite(&mut self.metric, patch.metric);
        overwrite(&mut self.value, patch.value);
        overwrite(&mut self.baseline, patch.baseline);
        overwrite(&mut self.weightage, patch.weightage);
        overwrite(&mut self.notes, patch.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_lowercases_attribute() {
        let row = AttributeLog::new("  Strength ", "Dead Lift", 120.0).normalized();
        assert_eq!(row.attribute.as_deref(), Some("strength"));

        let blank = AttributeLog::new("   ", "Dead Lift", 120.0).normalized();
        assert_eq!(blank.attribute, None);
    }

    #[test]
    fn test_belongs_to_is_case_insensitive() {
        let row = AttributeLog::new("luck", "Coin Flips", 3.0);
        assert!(row.belongs_to("LUCK"));
        assert!(row.belongs_to("Luck"));
        assert!(!row.belongs_to("curiosity"));
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut row = AttributeLog::new("resilience", "Cold Shower (Minutes)", 3.0)
            .with_baseline(5.0);
        row.apply(AttributeLog {
            value: Some(4.0),
            notes: Some("after run".to_owned()),
            ..AttributeLog::default()
        });

        assert_eq!(row.value, Some(4.0));
        assert_eq!(row.baseline, Some(5.0));
        assert_eq!(row.metric.as_deref(), Some("Cold Shower (Minutes)"));
        assert_eq!(row.notes.as_deref(), Some("after run"));
    }

    #[test]
    fn test_sparse_json_deserializes() {
        let row: AttributeLog = serde_json::from_str(r#"{"attribute":"luck","value":2}"#).unwrap();
        assert_eq!(row.value, Some(2.0));
        assert_eq!(row.metric, None);
    }
}
