//! Session Cookie Adapter: binds an identity token to the `token` cookie.

use actix_web::cookie::Cookie;
use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::config::env::RuntimeEnv;
use crate::error::AppError;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// The session cookie with the attribute profile for `env`.
pub fn session_cookie(token: &str, env: RuntimeEnv) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(env.cookie_secure())
        .same_site(env.cookie_same_site())
        .finish()
}

/// Set the session cookie on a response under construction.
pub fn attach(response: &mut HttpResponseBuilder, token: &str, env: RuntimeEnv) {
    response.cookie(session_cookie(token, env));
}

/// Expire the session cookie (`Max-Age=0`) with the same attribute profile.
///
/// Only the cookie is cleared; the token itself stays valid until expiry.
pub fn clear(response: &mut HttpResponse, env: RuntimeEnv) -> Result<(), AppError> {
    let mut cookie = session_cookie("", env);
    cookie.make_removal();
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::internal(format!("failed to clear session cookie: {e}")))
}
