use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use super::app_state;
use crate::auth::cookie::TOKEN_COOKIE;
use crate::auth::gate::authenticate;
use crate::auth::identity::Identity;
use crate::error::AppError;

/// Auth Gate as an extractor: the verified identity from the session cookie.
///
/// Naming this extractor in a handler signature gates the route. The identity
/// is also left in request extensions for anything downstream.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl std::ops::Deref for CurrentIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Run the Auth Gate against `req`, caching the result in extensions.
pub(super) fn gate(req: &HttpRequest) -> Result<Identity, AppError> {
    if let Some(identity) = req.extensions().get::<Identity>() {
        return Ok(identity.clone());
    }

    let state = app_state(req)?;
    let cookie = req.cookie(TOKEN_COOKIE);
    let identity = authenticate(cookie.as_ref().map(|c| c.value()), &state.security)?;

    req.extensions_mut().insert(identity.clone());
    Ok(identity)
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(gate(req).map(CurrentIdentity))
    }
}
