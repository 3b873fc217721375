// ABOUTME: Domain service layer for logic shared by the dashboard routes
// ABOUTME: Keeps fetch-then-reduce orchestration out of the HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! Domain service layer

/// Stats, level state, and the dashboard overview
pub mod status;
