use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use super::app_state;
use super::identity::gate;
use crate::auth::gate::require_admin;
use crate::auth::identity::Identity;
use crate::error::AppError;

/// Auth Gate followed by the Role Gate.
///
/// The role is read from the user record on every request, so a demotion
/// takes effect immediately even for tokens minted while the user was admin.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let identity = gate(&req)?;
            let state = app_state(&req)?;

            require_admin(&identity, state.store()).await?;

            Ok(AdminIdentity(identity))
        })
    }
}
