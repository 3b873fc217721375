// ABOUTME: Core types and constants for the Status Window service
// ABOUTME: Foundation crate with error handling, record models, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

#![deny(unsafe_code)]

//! # Status Core
//!
//! Foundation crate providing shared types for the Status Window service.
//! Both the engines and the HTTP service depend on it, so it is kept free of
//! I/O and changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Attribute names, table names, and personal defaults
//! - **models**: Record shapes for the attribute log, experience log, and catalogs

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Record models shared by the store, the engines, and the routes
pub mod models;
