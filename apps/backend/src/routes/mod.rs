//! HTTP surface: one module per resource.
//!
//! Handlers perform a single store call and send the driver-shaped result
//! back unmodified. Gated handlers name [`CurrentIdentity`] or
//! [`AdminIdentity`] in their signature; everything else is open.
//!
//! [`CurrentIdentity`]: crate::extractors::CurrentIdentity
//! [`AdminIdentity`]: crate::extractors::AdminIdentity

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;

pub mod auth;
pub mod health;
pub mod likes;
pub mod meals;
pub mod memberships;
pub mod payments;
pub mod requests;
pub mod reviews;
pub mod subscribers;
pub mod users;

pub const MEALS: &str = "meals";
pub const REQUESTED: &str = "requested";
pub const MEMBERSHIPS: &str = "memberships";
pub const UPCOMING: &str = "upcoming";
pub const LIKES: &str = "likes";
pub const REVIEWS: &str = "reviews";
pub const SUBSCRIBERS: &str = "subscribers";

/// Register every route on the app (used by `main` and by tests).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(users::configure_routes)
        .configure(meals::configure_routes)
        .configure(requests::configure_routes)
        .configure(memberships::configure_routes)
        .configure(likes::configure_routes)
        .configure(subscribers::configure_routes)
        .configure(reviews::configure_routes)
        .configure(payments::configure_routes);
}

/// 200 with `value` as the JSON body. `None` serializes as `null`.
pub(crate) fn send<T: Serialize>(value: T) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(value))
}

/// Never answer the request. The client waits until it gives up.
///
/// Used where malformed input is deliberately left unanswered instead of
/// rejected; see `PUT /user`, `POST /likes/{email}` and
/// `POST /create-payment-intent`.
pub(crate) async fn leave_unanswered(route: &'static str, reason: &'static str) -> Result<HttpResponse, AppError> {
    warn!(route, reason, "request left unanswered");
    std::future::pending().await
}
