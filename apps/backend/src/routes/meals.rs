use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::{send, MEALS};
use crate::error::AppError;
use crate::extractors::{AdminIdentity, CurrentIdentity, IdPath, JsonBody};
use crate::state::app_state::AppState;
use crate::store::{filter_id, Document, Filter};
use crate::utils::numeric::leading_int;

async fn list_meals(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(MEALS, Filter::new()).await?)
}

async fn get_meal(id: IdPath, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find_one(MEALS, filter_id(&id.0)).await?)
}

async fn add_meal(
    body: JsonBody,
    _admin: AdminIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let meal = body.into_document()?;
    send(app_state.store().insert_one(MEALS, meal).await?)
}

async fn delete_meal(
    _admin: AdminIdentity,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(app_state.store().delete_one(MEALS, filter_id(&id.0)).await?)
}

async fn update_meal(
    body: JsonBody,
    _admin: AdminIdentity,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes = body.into_document()?;
    send(
        app_state
            .store()
            .update_one(MEALS, filter_id(&id.0), changes, false)
            .await?,
    )
}

/// `likes` for the like-meal update: the client's current count plus one,
/// or `null` when the count cannot be read.
pub fn next_like_count(current: Option<&Value>) -> Value {
    current
        .and_then(leading_int)
        .and_then(|likes| likes.checked_add(1))
        .map_or(Value::Null, Value::from)
}

/// The client sends the count it last saw, so concurrent likes can overwrite
/// each other.
async fn like_meal(
    body: JsonBody,
    _identity: CurrentIdentity,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut changes = Document::new();
    changes.insert("likes".to_string(), next_like_count(body.field("likes")));

    send(
        app_state
            .store()
            .update_one(MEALS, filter_id(&id.0), changes, false)
            .await?,
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/meals")
            .route(web::get().to(list_meals))
            .route(web::post().to(add_meal)),
    )
    .service(
        web::resource("/meal/{id}")
            .route(web::get().to(get_meal))
            .route(web::delete().to(delete_meal))
            .route(web::put().to(update_meal)),
    )
    .route("/like-meal/{id}", web::patch().to(like_meal));
}
