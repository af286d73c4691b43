use jsonwebtoken::Algorithm;

/// Validity window of issued identity tokens: 365 days.
pub const TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Token signing configuration, passed explicitly into the Token Service.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC secret; empty means "not configured"
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: i64,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: TOKEN_TTL_SECS,
        }
    }

    /// No secret available: issuing fails and every token is rejected.
    pub fn unconfigured() -> Self {
        Self::new(Vec::new())
    }

    /// Read `ACCESS_TOKEN_SECRET`.
    pub fn from_env() -> Self {
        std::env::var("ACCESS_TOKEN_SECRET")
            .map(|secret| Self::new(secret.into_bytes()))
            .unwrap_or_else(|_| Self::unconfigured())
    }

    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
