// ABOUTME: Admin authentication with bcrypt passwords and HS256 JWT sessions
// ABOUTME: Issues and validates tokens, classifies validation failures, and resolves the signing secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! # Authentication
//!
//! Admin users sign in with email and password. Passwords are stored as
//! bcrypt hashes; a successful login yields an HS256 JWT whose audience is
//! `status-window`. The signing secret comes from the environment when set,
//! otherwise it is generated once and persisted in `system_secrets`.

use crate::config::AuthConfig;
use crate::database::{AdminUser, Database};
use crate::errors::{AppError, AppResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use status_core::constants::{secrets, service_names};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Detailed JWT validation failures
#[derive(Debug, Clone, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired at {}", expired_at.format("%Y-%m-%d %H:%M:%S UTC"))]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Signature, audience, or algorithm mismatch
    #[error("JWT token is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Not a structurally valid JWT
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// JWT claims for an admin session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id
    pub sub: String,
    /// Admin email
    pub email: String,
    /// Whether the user may mutate records
    pub is_admin: bool,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Audience
    pub aud: String,
}

impl Claims {
    /// Expiry as a timestamp
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// A freshly issued token
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// When it stops validating
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates admin session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager around a shared HS256 secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Configured session length in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Issue a session token for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails
    pub fn generate_token(&self, user: &AdminUser) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: service_names::JWT_AUDIENCE.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its claims
    ///
    /// Expiry is checked after decoding so an expired token reports when it
    /// expired instead of a generic failure.
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing why the token was rejected
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[service_names::JWT_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| Self::convert_jwt_error(&e))?
            .claims;

        let current_time = Utc::now();
        if current_time.timestamp() >= claims.exp {
            let expired_at = claims.expires_at();
            warn!(
                user.email = %claims.email,
                expired_at = %expired_at.to_rfc3339(),
                "JWT token expired"
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        debug!(user.email = %claims.email, "JWT token validated");
        Ok(claims)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &JwtError) -> JwtValidationError {
        warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience mismatch".into(),
            },
            ErrorKind::InvalidAlgorithm => JwtValidationError::TokenInvalid {
                reason: "Token algorithm not accepted".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Hash a password with bcrypt
///
/// # Errors
///
/// Returns an error if bcrypt rejects the input
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored bcrypt hash; malformed hashes never match
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

/// Bcrypt hash of a random password, checked when a login names no known user
///
/// Computed once, at the same cost as stored hashes, so unknown and known
/// emails take the same time to reject.
#[must_use]
pub fn dummy_password_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| {
        let password = hex::encode(&generate_jwt_secret()[..16]);
        hash(password, DEFAULT_COST).unwrap_or_default()
    })
}

/// Generate a random 64-byte JWT secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// The configured secret, or the persisted one (created on first start)
///
/// # Errors
///
/// Returns an error if the secret table cannot be read or written
pub async fn resolve_jwt_secret(config: &AuthConfig, database: &Database) -> AppResult<String> {
    if let Some(secret) = config.jwt_secret.as_deref().filter(|s| !s.trim().is_empty()) {
        debug!("Using JWT secret from environment");
        return Ok(secret.to_owned());
    }

    database
        .get_or_create_system_secret(secrets::ADMIN_JWT_SECRET, || {
            hex::encode(generate_jwt_secret())
        })
        .await
}
