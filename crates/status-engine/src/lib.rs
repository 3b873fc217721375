// ABOUTME: Attribute scoring and experience leveling engines for the Status Window service
// ABOUTME: Pure functions over already-fetched rows; no I/O, no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![deny(unsafe_code)]

//! # Status Engine
//!
//! Two leaf computations used by the HTTP service:
//!
//! - **score**: maps attribute-log rows and the personal constants to a total
//!   and a per-metric breakdown for one of six attributes
//! - **experience**: sums the experience log and places the total on a
//!   uniform level curve
//!
//! Both are synchronous and deterministic. Callers fetch rows first, then
//! reduce them here, and may evaluate different attributes concurrently.

/// The six recognized attributes
pub mod attributes;

/// Experience totals, levels, and progress
pub mod experience;

/// Per-attribute scoring formulas and aggregation
pub mod score;

/// Two-decimal rounding shared by both engines
///
/// Values that round to zero come back as `0.0`, never `-0.0`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    // -0.0 + 0.0 is +0.0
    (value * 100.0).round() / 100.0 + 0.0
}

pub use attributes::Attribute;
pub use experience::{
    compute_experience_state, LevelCurve, LevelCurveError, LevelState, LevelSummary,
};
pub use score::{
    compute_attribute_score, try_attribute_score, AttributeScore, Breakdown, ScoreBreakdown,
    ScoreError,
};
