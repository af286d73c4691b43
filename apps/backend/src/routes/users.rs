use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::{leave_unanswered, send};
use crate::auth::gate::USERS_COLLECTION as USERS;
use crate::error::AppError;
use crate::extractors::{CurrentIdentity, IdPath, JsonBody};
use crate::state::app_state::AppState;
use crate::store::{filter_eq, filter_id, Filter};

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(USERS, Filter::new()).await?)
}

/// First-login registration: return the existing record for `email`, or
/// upsert the posted profile stamped with the current time in milliseconds.
async fn save_user(
    body: JsonBody,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let present = |field: &str| body.field(field).is_some_and(|v| !v.is_null());
    if !present("email") {
        return leave_unanswered("PUT /user", "missing email").await;
    }
    if !present("name") {
        return leave_unanswered("PUT /user", "missing name").await;
    }

    let mut user = body.into_document()?;
    let email = user.get("email").cloned().unwrap_or(Value::Null);

    if let Some(existing) = app_state
        .store()
        .find_one(USERS, filter_eq("email", email.clone()))
        .await?
    {
        return send(existing);
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    user.insert("timestamp".to_string(), Value::from(timestamp));

    send(
        app_state
            .store()
            .update_one(USERS, filter_eq("email", email), user, true)
            .await?,
    )
}

async fn update_user(
    body: JsonBody,
    _identity: CurrentIdentity,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes = body.into_document()?;
    send(
        app_state
            .store()
            .update_one(USERS, filter_id(&id.0), changes, false)
            .await?,
    )
}

async fn get_user(
    email: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(
        app_state
            .store()
            .find_one(USERS, filter_eq("email", email.into_inner()))
            .await?,
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(list_users))
        .route("/user", web::put().to(save_user))
        .route("/users/{id}", web::patch().to(update_user))
        .route("/user/{email}", web::get().to(get_user));
}
