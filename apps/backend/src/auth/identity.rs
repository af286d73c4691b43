use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::jwt::Claims;

/// Arbitrary key/value identity payload signed into a token, e.g. `{"email": ...}`.
pub type IdentityClaim = Map<String, Value>;

/// Decoded identity attached to the request context by the Auth Gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub claims: IdentityClaim,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Identity {
    /// The subject's email, when the claim carries one as a string.
    pub fn email(&self) -> Option<&str> {
        self.claims.get("email").and_then(Value::as_str)
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            claims: claims.identity,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
