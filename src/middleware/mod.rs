// ABOUTME: HTTP middleware for admin authorization, CORS, and request tracing
// ABOUTME: Provides request ID generation, per-request spans, and the bearer-token guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

pub mod admin_guard;
pub mod cors;
pub mod tracing;

// Admin authorization
pub use admin_guard::{
    authenticate, bearer_token, require_admin, require_admin_middleware, AdminContext,
};

// CORS configuration
pub use cors::setup_cors;

// Request tracing and correlation
pub use tracing::{
    make_request_span, propagate_request_id_layer, set_request_id_layer, REQUEST_ID_HEADER,
};
