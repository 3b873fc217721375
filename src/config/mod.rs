// ABOUTME: Configuration module root for the Status Window service
// ABOUTME: Re-exports environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Configuration management

/// Environment variable parsing and validation
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseUrl, Environment, HttpConfig, LogLevel, ServerConfig,
};
