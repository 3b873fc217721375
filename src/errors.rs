// ABOUTME: Error types for the status window service
// ABOUTME: Re-exports the shared AppError and ErrorCode from status-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! # Unified Error Handling System
//!
//! Error types live in `status-core` so the engines, the store, and the
//! routes share one taxonomy. The `http-response` feature supplies the axum
//! `IntoResponse` impl, which renders `{"error": message, "code": ...}`.

pub use status_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
