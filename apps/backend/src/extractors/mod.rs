//! Request extractors binding the authorization stages and request parsing
//! to handler signatures.

pub mod admin;
pub mod identity;
pub mod json_body;
pub mod object_id;

use actix_web::{web, HttpRequest};

pub use admin::AdminIdentity;
pub use identity::CurrentIdentity;
pub use json_body::JsonBody;
pub use object_id::IdPath;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Shared application state registered on the `App`.
pub(crate) fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available"))
}
