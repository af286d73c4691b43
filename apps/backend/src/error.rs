use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::jwt::TokenError;
use crate::errors::ErrorCode;
use crate::payments::PaymentError;
use crate::store::StoreError;
use crate::trace_ctx;

/// Fixed rejection message when the session cookie is missing.
pub const UNAUTHORIZED_USER: &str = "Unauthorized User";
/// Fixed rejection message for bad tokens and failed role checks.
pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized Access";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {message}")]
    Unauthorized {
        code: ErrorCode,
        message: &'static str,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Token signing failed: {0}")]
    Signing(#[source] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Signing(_) => ErrorCode::TokenSigning,
            AppError::Store(StoreError::InvalidId(_)) => ErrorCode::InvalidObjectId,
            AppError::Store(StoreError::DuplicateKey(_)) => ErrorCode::DuplicateKey,
            AppError::Store(StoreError::ImmutableId) => ErrorCode::ImmutableId,
            AppError::Store(_) => ErrorCode::StoreError,
            AppError::Payment(_) => ErrorCode::PaymentProvider,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Message placed in the response body.
    fn message(&self) -> String {
        match self {
            AppError::Unauthorized { message, .. } => (*message).to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Signing(_)
            | AppError::Store(_)
            | AppError::Payment(_)
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Auth Gate rejection: no session cookie.
    pub fn unauthorized_user() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedUser,
            message: UNAUTHORIZED_USER,
        }
    }

    /// Auth Gate rejection: token failed verification.
    pub fn unauthorized_access() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedAccess,
            message: UNAUTHORIZED_ACCESS,
        }
    }

    /// Role Gate rejection. Same wire message as a bad token.
    pub fn insufficient_role() -> Self {
        Self::Unauthorized {
            code: ErrorCode::InsufficientRole,
            message: UNAUTHORIZED_ACCESS,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(code = %self.code(), error = %self, "request failed");
        }

        let body = ErrorBody {
            message: self.message(),
            code: self.code().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
