// ABOUTME: CORS middleware configuration for the dashboard and admin API
// ABOUTME: Builds the tower-http CorsLayer from the configured origin list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

use crate::config::CorsConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` or an empty value allows any origin; otherwise the value is a
/// comma-separated origin list. Entries that are not valid header values
/// are skipped, and a list with no valid entries falls back to any origin.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://status.example.com,https://admin.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

fn allow_origin(allowed_origins: &str) -> AllowOrigin {
    let allowed_origins = allowed_origins.trim();
    if allowed_origins.is_empty() || allowed_origins == "*" {
        return AllowOrigin::any();
    }

    let origins = parse_origins(allowed_origins);
    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}

fn parse_origins(allowed_origins: &str) -> Vec<HeaderValue> {
    allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("https://a.example.com, ,https://b.example.com");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://b.example.com");
    }
}
