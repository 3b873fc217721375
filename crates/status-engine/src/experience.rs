// ABOUTME: Experience totals and the uniform level curve
// ABOUTME: Level is floor(total / xp_per_level) + 1, progress is the remainder as a percentage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Experience leveling.
//!
//! Level 1 requires 0 XP and every further level costs the same amount.
//! The closed form `floor(total / xp_per_level) + 1` is used; it agrees with
//! the "smallest level whose threshold is at most the total" search for any
//! uniform curve.

use crate::round2;
use serde::Serialize;
use status_core::constants::leveling;
use status_core::models::ExperienceEntry;
use thiserror::Error;

/// Largest progress value reported; the curve never reaches 100% of a level
const PROGRESS_CEILING: f64 = 99.99;

/// Completed levels are capped so that `current_level` fits in a `u32`
const MAX_COMPLETED_LEVELS: u32 = u32::MAX - 1;

/// A quotient this close to a whole number counts as that number
const LEVEL_SNAP: f64 = 1e-9;

/// Invalid curve parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelCurveError {
    /// XP per level must be a positive, finite number
    #[error("XP per level must be positive and finite, got {0}")]
    InvalidXpPerLevel(f64),
}

/// A uniform level curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    xp_per_level: f64,
}

impl LevelCurve {
    /// Create a curve with the given XP per level
    ///
    /// # Errors
    ///
    /// Returns [`LevelCurveError::InvalidXpPerLevel`] for zero, negative,
    /// or non-finite values
    pub fn new(xp_per_level: f64) -> Result<Self, LevelCurveError> {
        if xp_per_level.is_finite() && xp_per_level > 0.0 {
            Ok(Self { xp_per_level })
        } else {
            Err(LevelCurveError::InvalidXpPerLevel(xp_per_level))
        }
    }

    /// XP per level
    #[must_use]
    pub const fn xp_per_level(&self) -> f64 {
        self.xp_per_level
    }

    /// Whole levels completed by `total`, tolerating float error at level boundaries
    fn levels_completed(&self, total: f64) -> f64 {
        let quotient = total / self.xp_per_level;
        let nearest = quotient.round();
        let whole = if (quotient - nearest).abs() < LEVEL_SNAP {
            nearest
        } else {
            quotient.floor()
        };
        whole.min(f64::from(MAX_COMPLETED_LEVELS))
    }

    /// Place a total on the curve
    #[must_use]
    pub fn state_for(&self, total_experience: f64) -> LevelState {
        let total_experience = round2(total_experience);
        if total_experience <= 0.0 || !total_experience.is_finite() {
            return LevelState {
                total_experience,
                current_level: 1,
                progress_percentage: 0.0,
                xp_per_level: self.xp_per_level,
            };
        }

        let completed = self.levels_completed(total_experience);
        let current_level = (completed as u32).saturating_add(1);
        let into_level = total_experience - completed * self.xp_per_level;
        let progress = round2(into_level / self.xp_per_level * 100.0);

        LevelState {
            total_experience,
            current_level,
            progress_percentage: progress.clamp(0.0, PROGRESS_CEILING),
            xp_per_level: self.xp_per_level,
        }
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            xp_per_level: leveling::XP_PER_LEVEL,
        }
    }
}

/// Where an experience total sits on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelState {
    /// Sum of all awards, rounded to two decimals
    pub total_experience: f64,
    /// Current level, starting at 1
    pub current_level: u32,
    /// Percentage of the current level completed, in `[0, 100)`
    pub progress_percentage: f64,
    #[serde(skip)]
    xp_per_level: f64,
}

impl LevelState {
    /// Total XP at which the current level started
    #[must_use]
    pub fn xp_for_current_level(&self) -> f64 {
        f64::from(self.current_level.saturating_sub(1)) * self.xp_per_level
    }

    /// Total XP at which the next level starts
    #[must_use]
    pub fn xp_for_next_level(&self) -> f64 {
        f64::from(self.current_level) * self.xp_per_level
    }

    /// XP earned inside the current level
    #[must_use]
    pub fn experience_into_level(&self) -> f64 {
        round2((self.total_experience - self.xp_for_current_level()).max(0.0))
    }

    /// Expanded view for the detailed experience endpoint
    #[must_use]
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            total_experience: self.total_experience,
            current_level: self.current_level,
            current_experience: self.total_experience,
            experience_into_level: self.experience_into_level(),
            current_level_exp: self.xp_for_current_level(),
            next_level_exp: self.xp_for_next_level(),
            progress_percentage: self.progress_percentage,
        }
    }
}

/// Level state with the thresholds around it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSummary {
    /// Sum of all awards
    pub total_experience: f64,
    /// Current level
    pub current_level: u32,
    /// Sum of all awards, comparable with the level thresholds below
    pub current_experience: f64,
    /// XP earned inside the current level
    pub experience_into_level: f64,
    /// Total XP at which the current level started
    pub current_level_exp: f64,
    /// Total XP at which the next level starts
    pub next_level_exp: f64,
    /// Percentage of the current level completed
    pub progress_percentage: f64,
}

/// Sum the log and place it on the curve; missing amounts count as zero
#[must_use]
pub fn compute_experience_state(rows: &[ExperienceEntry], curve: &LevelCurve) -> LevelState {
    let total: f64 = rows.iter().filter_map(|r| r.experience).sum();
    curve.state_for(total)
}
