//! Token Service: issues and verifies signed, time-limited identity tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::identity::IdentityClaim;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("clock is before the unix epoch")]
    Clock,
    #[error("failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
}

/// Claims carried by an identity token: the caller-supplied identity object
/// flattened alongside `iat` and `exp`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: IdentityClaim,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Sign `identity` with the configured secret, valid for `token_ttl_secs` from `now`.
///
/// Any `iat`/`exp` keys in `identity` are replaced by the service's own.
pub fn mint_access_token(
    identity: &IdentityClaim,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    if !security.has_secret() {
        return Err(TokenError::MissingSecret);
    }

    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Clock)?
        .as_secs() as i64;

    let mut identity = identity.clone();
    identity.remove("iat");
    identity.remove("exp");

    let claims = Claims {
        identity,
        iat,
        exp: iat + security.token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(TokenError::Encode)
}

/// Check signature and expiry against `now`, returning the decoded claims.
///
/// A token is expired once `now >= exp`.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    if !security.has_secret() {
        return Err(TokenError::MissingSecret);
    }

    // Pin the algorithm; expiry is checked below against the caller's clock.
    // Identity keys such as `aud` are caller data, never validated.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let now = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Clock)?
        .as_secs() as i64;
    if now >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
