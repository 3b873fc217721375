// ABOUTME: Main library entry point for the Status Window server
// ABOUTME: Wires the score and experience engines to an axum API backed by SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![deny(unsafe_code)]

//! # Status Window
//!
//! A gamified personal stats dashboard. Attribute log rows are reduced into
//! per-attribute scores, experience log rows into a level and progress bar,
//! and the catalog tables (articles, campaigns, projects, poetry, skills,
//! status effects) are served to the dashboard as-is.
//!
//! ## Architecture
//!
//! - **`status-core`**: shared models, constants, and the error type
//! - **`status-engine`**: pure score and level computations
//! - **`database`**: `SQLite` persistence for every record table
//! - **`routes`**: public dashboard reads and admin-only writes
//! - **`auth`**: bcrypt passwords and HS256 session tokens for admins
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use status_window::config::environment::ServerConfig;
//! use status_window::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::initialize(config).await?;
//!     status_window::server::run(Arc::new(resources)).await
//! }
//! ```

/// Admin password hashing and session tokens
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// `SQLite` persistence for records, admin users, and system secrets
pub mod database;

/// Error types shared with `status-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: admin guard, CORS, request ids
pub mod middleware;

/// Shared server resources handed to every route group
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and the serve loop
pub mod server;

/// Stat and overview computations over stored records
pub mod services;
