//! Error codes for the Meal Lounge backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! error response bodies.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No session cookie on the request
    UnauthorizedUser,
    /// Session token failed verification
    UnauthorizedAccess,
    /// Authenticated identity lacks the admin role
    InsufficientRole,

    // Request Validation
    /// General bad request error
    BadRequest,
    /// Request body is not valid JSON of the expected shape
    InvalidJson,

    // Document store
    /// Path identifier is not a 24-character hex ObjectId
    InvalidObjectId,
    /// Insert collided with an existing primary key or unique index
    DuplicateKey,
    /// Update attempted to change a document's `_id`
    ImmutableId,
    /// Any other store failure
    StoreError,

    // Outbound services
    /// Token could not be signed
    TokenSigning,
    /// Payment provider rejected or failed the request
    PaymentProvider,

    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedUser => "UNAUTHORIZED_USER",
            Self::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidJson => "INVALID_JSON",

            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::ImmutableId => "IMMUTABLE_ID",
            Self::StoreError => "STORE_ERROR",

            Self::TokenSigning => "TOKEN_SIGNING",
            Self::PaymentProvider => "PAYMENT_PROVIDER",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
