//! Meal requests (`requested` collection).

use actix_web::{web, HttpResponse};

use super::{send, REQUESTED};
use crate::error::AppError;
use crate::extractors::{CurrentIdentity, IdPath, JsonBody};
use crate::state::app_state::AppState;
use crate::store::{filter_eq, filter_id, Filter};

async fn request_meal(
    body: JsonBody,
    _identity: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_document()?;
    send(app_state.store().insert_one(REQUESTED, request).await?)
}

async fn list_requests(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(REQUESTED, Filter::new()).await?)
}

async fn requests_by_status(
    status: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(
        app_state
            .store()
            .find(REQUESTED, filter_eq("status", status.into_inner()))
            .await?,
    )
}

/// Partial update, e.g. marking a request delivered.
async fn update_request(
    body: JsonBody,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes = body.into_document()?;
    send(
        app_state
            .store()
            .update_one(REQUESTED, filter_id(&id.0), changes, false)
            .await?,
    )
}

async fn delete_request(
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(app_state.store().delete_one(REQUESTED, filter_id(&id.0)).await?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/requested", web::post().to(request_meal))
        .route("/requests", web::get().to(list_requests))
        .route("/requests/{stat}", web::get().to(requests_by_status))
        .service(
            web::resource("/requested/{id}")
                .route(web::patch().to(update_request))
                .route(web::delete().to(delete_request)),
        );
}
