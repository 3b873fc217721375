// ABOUTME: Application-wide constants for attributes, record tables, and defaults
// ABOUTME: Centralizes names and numbers shared by the engines, the store, and the routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Constants organized by domain.

/// Canonical lowercase attribute names, in dashboard display order
pub mod attributes {
    /// Physical strength from lifts and bodyweight work
    pub const STRENGTH: &str = "strength";
    /// Weighted learning metrics
    pub const INTELLIGENCE: &str = "intelligence";
    /// Recovery and endurance metrics
    pub const RESILIENCE: &str = "resilience";
    /// Weighted creative output
    pub const CREATIVITY: &str = "creativity";
    /// Raw luck tallies
    pub const LUCK: &str = "luck";
    /// Raw curiosity tallies
    pub const CURIOSITY: &str = "curiosity";

    /// All recognized attributes
    pub const ALL: [&str; 6] = [STRENGTH, INTELLIGENCE, RESILIENCE, CREATIVITY, LUCK, CURIOSITY];

    /// Pseudo-attribute served by the stats endpoint from the experience log
    pub const EXPERIENCE: &str = "experience";
}

/// Metric names with special handling in the scoring formulas
pub mod metrics {
    /// Lower is better; scored as baseline / value
    pub const RESTING_HEART_RATE: &str = "Resting Heart Rate";
    /// Lower is better; scored as baseline / value
    pub const STRESS_RECOVERY_TIME: &str = "Stress Recovery Time (Minutes)";
    /// Breakdown key for rows without a metric name
    pub const UNKNOWN: &str = "unknown";
}

/// Leveling curve defaults
pub mod leveling {
    /// Experience required per level
    pub const XP_PER_LEVEL: f64 = 100.0;
}

/// Personal constants used when the environment does not override them
pub mod profile {
    /// Display name
    pub const DEFAULT_NAME: &str = "Akshat Pande";
    /// Body weight in kilograms
    pub const DEFAULT_WEIGHT_KG: f64 = 77.15;
    /// Height in centimeters
    pub const DEFAULT_HEIGHT_CM: f64 = 180.0;
    /// Body mass index
    pub const DEFAULT_BMI: f64 = 25.1;
    /// Body fat percentage
    pub const DEFAULT_BODY_FAT_PCT: f64 = 24.7;
    /// Age in years
    pub const DEFAULT_AGE: f64 = 29.0;

    /// Height at which the height adjustment is zero
    pub const REFERENCE_HEIGHT_CM: f64 = 175.0;
    /// Age at which the age adjustment is zero
    pub const REFERENCE_AGE: f64 = 25.0;
    /// Height adjustment per centimeter above the reference
    pub const HEIGHT_FACTOR: f64 = 0.001;
    /// Age adjustment per year above the reference
    pub const AGE_FACTOR: f64 = 0.01;
    /// Scale of the lean-mass adjustment
    pub const BODY_FAT_FACTOR: f64 = 0.1;
}

/// Record store table names
pub mod tables {
    /// Attribute metric log
    pub const ATTRIBUTES_LOG: &str = "attributes_log";
    /// Experience log
    pub const EXPERIENCE_LOG: &str = "experience_log";
    /// Articles catalog
    pub const ARTICLES: &str = "articles";
    /// Campaigns catalog
    pub const CAMPAIGNS: &str = "campaigns";
    /// Projects catalog
    pub const PROJECTS: &str = "projects";
    /// Poetry catalog
    pub const POETRY: &str = "poetry";
    /// Skills catalog
    pub const SKILLS: &str = "skills";
    /// Status effects catalog
    pub const STATUS_EFFECTS: &str = "status_effects";
    /// Admin accounts
    pub const ADMIN_USERS: &str = "admin_users";
    /// Generated secrets persisted across restarts
    pub const SYSTEM_SECRETS: &str = "system_secrets";
}

/// Service identity used in logs and tokens
pub mod service_names {
    /// Service name for structured logging
    pub const STATUS_WINDOW: &str = "status-window";
    /// JWT audience
    pub const JWT_AUDIENCE: &str = "status-window";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Secret identifiers in the `system_secrets` table
pub mod secrets {
    /// HS256 signing key for admin sessions
    pub const ADMIN_JWT_SECRET: &str = "admin_jwt_secret";
}

/// Environment variable names
pub mod env_keys {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Record store URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Log filter
    pub const RUST_LOG: &str = "RUST_LOG";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Comma separated CORS origins, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Admin session lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Fixed JWT signing secret; generated and persisted when unset
    pub const JWT_SECRET: &str = "STATUS_WINDOW_JWT_SECRET";
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Maximum accepted request body
    pub const MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
    /// Experience per level
    pub const XP_PER_LEVEL: &str = "XP_PER_LEVEL";
    /// Profile display name
    pub const PROFILE_NAME: &str = "PROFILE_NAME";
    /// Profile weight in kilograms
    pub const PROFILE_WEIGHT_KG: &str = "PROFILE_WEIGHT_KG";
    /// Profile height in centimeters
    pub const PROFILE_HEIGHT_CM: &str = "PROFILE_HEIGHT_CM";
    /// Profile body mass index
    pub const PROFILE_BMI: &str = "PROFILE_BMI";
    /// Profile body fat percentage
    pub const PROFILE_BODY_FAT_PCT: &str = "PROFILE_BODY_FAT_PCT";
    /// Profile age in years
    pub const PROFILE_AGE: &str = "PROFILE_AGE";
}

/// Defaults for values read from the environment
pub mod defaults {
    /// Record store location
    pub const DATABASE_URL: &str = "sqlite:./data/status_window.db";
    /// Admin session lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted request body (1 MiB)
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}
