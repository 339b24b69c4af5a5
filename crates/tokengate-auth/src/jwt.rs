//! Token signing and verification.
//!
//! Both tokens carry the same [`Claims`] payload and differ only in lifetime
//! and signing secret:
//!
//! - **Access tokens** are short-lived and signed with `access_secret`
//! - **Refresh tokens** live for `refresh_token_expiry` (7 days by default),
//!   are signed with `refresh_secret`, and are never rotated on refresh
//!
//! Verification failures map to `403 Forbidden`; the caller decides whether a
//! missing token is a `401`.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use tokengate_config::JwtConfig;
use tokengate_core::AppError;

use crate::claims::{Claims, User};

/// Creates a short-lived access token for `user`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    issue(
        user,
        &jwt_config.access_secret,
        jwt_config.access_token_expiry,
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Creates a long-lived refresh token for `user`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_refresh_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    issue(
        user,
        &jwt_config.refresh_secret,
        jwt_config.refresh_token_expiry,
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create refresh token: {}", e)))
}

/// Verifies an access token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns a forbidden error if the token is malformed, expired, or was not
/// signed with the access secret.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify(token, &jwt_config.access_secret)
        .map_err(|_| AppError::forbidden(anyhow!("Invalid token")))
}

/// Verifies a refresh token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns a forbidden error if the token is malformed, expired, or was not
/// signed with the refresh secret.
pub fn verify_refresh_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify(token, &jwt_config.refresh_secret)
        .map_err(|_| AppError::forbidden(anyhow!("Invalid refresh token")))
}

fn issue(user: &User, secret: &str, ttl_secs: i64) -> jsonwebtoken::errors::Result<String> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        iat: Some(now),
        exp: Some(now + ttl_secs),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn verify(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
