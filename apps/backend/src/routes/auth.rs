use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::auth::cookie;
use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

/// Sign whatever identity the client posts and hand it back as the session cookie.
async fn issue_token(
    body: JsonBody,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = body.into_document()?;

    let token = mint_access_token(&identity, SystemTime::now(), &app_state.security)
        .map_err(AppError::Signing)?;

    if let Some(email) = identity.get("email").and_then(|e| e.as_str()) {
        info!(email = %Redacted(email), "session token issued");
    }

    let mut response = HttpResponse::Ok();
    cookie::attach(&mut response, &token, app_state.env);
    Ok(response.json(json!({ "success": true })))
}

/// Expire the session cookie. The token itself stays valid until expiry.
async fn logout(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut response = HttpResponse::Ok().json(json!({ "success": true }));
    cookie::clear(&mut response, app_state.env)?;
    Ok(response)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/jwt", web::post().to(issue_token))
        .route("/logout", web::get().to(logout));
}
