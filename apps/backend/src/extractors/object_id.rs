use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::store::ObjectId;

/// The `{id}` path segment parsed as a 24-hex document id.
///
/// A malformed id is a store error (500), matching what the driver reports
/// when asked to look one up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub ObjectId);

impl FromRequest for IdPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("id") {
            Some(raw) => ObjectId::parse(raw).map(IdPath).map_err(AppError::from),
            None => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Missing id parameter",
            )),
        };
        ready(parsed)
    }
}
