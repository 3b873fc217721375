// ABOUTME: Per-attribute scoring formulas and aggregation into totals and breakdowns
// ABOUTME: Error conditions are returned as data so callers always get a renderable pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Attribute scoring.
//!
//! Each attribute-log row contributes one number to its attribute's total:
//!
//! | Attribute | Formula |
//! |---|---|
//! | Strength | `value / baseline(metric) * (1 + h) * (1 - a) * (1 + bf)` |
//! | Intelligence, Creativity | `value * weightage` |
//! | Resilience | `value / baseline * (1 - a)` |
//! | Luck, Curiosity | `value` |
//!
//! where `h`, `a`, and `bf` are the height, age, and body-fat adjustments of
//! [`PersonalConstants`]. Resting heart rate and stress recovery time are
//! inverted because lower is better. Every division is guarded: a zero
//! denominator scores zero.
//!
//! The breakdown maps metric name to rounded score. When two rows share a
//! metric name the later row replaces the earlier entry while both still
//! count toward the total.

use crate::attributes::Attribute;
use crate::round2;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use status_core::constants::metrics;
use status_core::models::{AttributeLog, PersonalConstants};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Why an attribute could not be scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// No attribute name was supplied
    #[error("Invalid or missing attribute")]
    MissingAttribute,
    /// The name is not one of the six attributes
    #[error("Invalid attribute")]
    UnknownAttribute {
        /// Name as requested
        name: String,
    },
    /// The attribute has no logged rows
    #[error("No data found")]
    NoData,
}

/// Successful aggregation for one attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Attribute that was scored
    pub attribute: Attribute,
    /// Sum of all row scores, rounded to two decimals
    pub total: f64,
    /// Rounded score per metric name (last write wins)
    pub metrics: BTreeMap<String, f64>,
    /// Number of rows that contributed to the total
    pub rows_scored: usize,
}

/// Breakdown as rendered to clients
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// Metric name to score
    Metrics(BTreeMap<String, f64>),
    /// Error marker, rendered as `{"error": "<message>"}`
    Error(ScoreError),
}

impl Breakdown {
    /// Error message when this is an error marker
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Metrics(_) => None,
            Self::Error(e) => Some(e.to_string()),
        }
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Metrics(metrics) => metrics.serialize(serializer),
            Self::Error(error) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &error.to_string())?;
                map.end()
            }
        }
    }
}

/// Total and breakdown pair; error conditions carry a total of zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeScore {
    /// Rounded total
    pub total: f64,
    /// Per-metric scores or an error marker
    pub breakdown: Breakdown,
}

impl From<Result<ScoreBreakdown, ScoreError>> for AttributeScore {
    fn from(result: Result<ScoreBreakdown, ScoreError>) -> Self {
        match result {
            Ok(scored) => Self {
                total: scored.total,
                breakdown: Breakdown::Metrics(scored.metrics),
            },
            Err(error) => Self {
                total: 0.0,
                breakdown: Breakdown::Error(error),
            },
        }
    }
}

/// Score an attribute, folding every error into the returned pair
#[must_use]
pub fn compute_attribute_score(
    attribute: Option<&str>,
    rows: &[AttributeLog],
    constants: &PersonalConstants,
) -> AttributeScore {
    try_attribute_score(attribute, rows, constants).into()
}

/// Score an attribute
///
/// Rows are matched to the attribute case-insensitively, so the caller may
/// pass rows that were already filtered or the whole log.
///
/// # Errors
///
/// - [`ScoreError::MissingAttribute`] when `attribute` is `None` or blank
/// - [`ScoreError::UnknownAttribute`] when it names none of the six attributes
/// - [`ScoreError::NoData`] when no row matches
pub fn try_attribute_score(
    attribute: Option<&str>,
    rows: &[AttributeLog],
    constants: &PersonalConstants,
) -> Result<ScoreBreakdown, ScoreError> {
    let name = attribute
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ScoreError::MissingAttribute)?;
    let attribute = Attribute::parse(name).ok_or_else(|| ScoreError::UnknownAttribute {
        name: name.to_owned(),
    })?;

    let mut total = 0.0;
    let mut metrics = BTreeMap::new();
    let mut rows_scored = 0;

    for row in rows.iter().filter(|r| r.belongs_to(attribute.as_str())) {
        let score = score_row(attribute, row, constants);
        total += score;
        rows_scored += 1;
        let key = row.metric.clone().unwrap_or_else(|| metrics::UNKNOWN.to_owned());
        metrics.insert(key, round2(score));
    }

    if rows_scored == 0 {
        return Err(ScoreError::NoData);
    }

    debug!(
        score.attribute = %attribute,
        score.rows = rows_scored,
        score.total = total,
        "Attribute scored"
    );

    Ok(ScoreBreakdown {
        attribute,
        total: round2(total),
        metrics,
        rows_scored,
    })
}

/// Dispatch one row to its attribute's formula
#[must_use]
pub fn score_row(attribute: Attribute, row: &AttributeLog, constants: &PersonalConstants) -> f64 {
    match attribute {
        Attribute::Strength => strength_score(row, constants),
        Attribute::Intelligence | Attribute::Creativity => weighted_score(row),
        Attribute::Resilience => resilience_score(row, constants),
        Attribute::Luck | Attribute::Curiosity => identity_score(row),
    }
}

/// Baseline for a strength metric; unknown metrics have none
#[must_use]
pub fn strength_baseline(metric: &str, body_weight: f64) -> f64 {
    match metric {
        "Bench Press (Kg)" => body_weight,
        "BW PullUps (Rep)" | "BW Dips (Rep)" => 10.0,
        "BW PushUps (Rep)" => 20.0,
        "Barbell Curl (Kg)" => 0.5 * body_weight,
        "Shoulder Press (Kg)" => 0.6 * body_weight,
        "Squats (Kg)" => 1.5 * body_weight,
        "Grip Strength" => 50.0,
        "Leg Press" => 2.0 * body_weight,
        "Dead Lift" => 1.8 * body_weight,
        metrics::RESTING_HEART_RATE => 60.0,
        "BW Plank" => 120.0,
        _ => 0.0,
    }
}

/// Strength row score
#[must_use]
pub fn strength_score(row: &AttributeLog, constants: &PersonalConstants) -> f64 {
    let metric = row.metric.as_deref().unwrap_or_default();
    let value = row.value.unwrap_or(0.0);
    let baseline = strength_baseline(metric, constants.weight);
    let body_fat = constants.body_fat_adjustment();

    if metric == metrics::RESTING_HEART_RATE {
        return if value > 0.0 {
            baseline / value * (1.0 - body_fat)
        } else {
            0.0
        };
    }

    if baseline > 0.0 {
        value / baseline
            * (1.0 + constants.height_adjustment())
            * (1.0 - constants.age_adjustment())
            * (1.0 + body_fat)
    } else {
        0.0
    }
}

/// Resilience row score against the row's own baseline
#[must_use]
pub fn resilience_score(row: &AttributeLog, constants: &PersonalConstants) -> f64 {
    let value = row.value.unwrap_or(0.0);
    let baseline = row.baseline.unwrap_or(0.0);
    let age = 1.0 - constants.age_adjustment();

    if row.metric.as_deref() == Some(metrics::STRESS_RECOVERY_TIME) {
        return if value > 0.0 {
            baseline / value * age
        } else {
            0.0
        };
    }

    if baseline > 0.0 {
        value / baseline * age
    } else {
        0.0
    }
}

/// `value * weightage`; an unset or zero weightage counts as 1
#[must_use]
pub fn weighted_score(row: &AttributeLog) -> f64 {
    let weightage = row.weightage.filter(|w| *w != 0.0).unwrap_or(1.0);
    row.value.unwrap_or(0.0) * weightage
}

/// The logged value, unmodified
#[must_use]
pub fn identity_score(row: &AttributeLog) -> f64 {
    row.value.unwrap_or(0.0)
}
