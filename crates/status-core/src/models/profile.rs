// ABOUTME: Personal constants record feeding the strength and resilience formulas
// ABOUTME: Process-wide configuration loaded once at startup and never mutated

use crate::constants::profile;
use serde::{Deserialize, Serialize};

/// Body and identity constants of the person whose stats are tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalConstants {
    /// Display name
    pub name: String,
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Body mass index
    pub bmi: f64,
    /// Body fat percentage
    pub bfat: f64,
    /// Age in years
    pub age: f64,
}

impl Default for PersonalConstants {
    fn default() -> Self {
        Self {
            name: profile::DEFAULT_NAME.to_owned(),
            weight: profile::DEFAULT_WEIGHT_KG,
            height: profile::DEFAULT_HEIGHT_CM,
            bmi: profile::DEFAULT_BMI,
            bfat: profile::DEFAULT_BODY_FAT_PCT,
            age: profile::DEFAULT_AGE,
        }
    }
}

impl PersonalConstants {
    /// `(height - 175) * 0.001`
    #[must_use]
    pub fn height_adjustment(&self) -> f64 {
        (self.height - profile::REFERENCE_HEIGHT_CM) * profile::HEIGHT_FACTOR
    }

    /// `(age - 25) * 0.01`
    #[must_use]
    pub fn age_adjustment(&self) -> f64 {
        (self.age - profile::REFERENCE_AGE) * profile::AGE_FACTOR
    }

    /// `(1 - bfat / 100) * 0.1`
    #[must_use]
    pub fn body_fat_adjustment(&self) -> f64 {
        (1.0 - self.bfat / 100.0) * profile::BODY_FAT_FACTOR
    }
}
