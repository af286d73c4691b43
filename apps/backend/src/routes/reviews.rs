use actix_web::{web, HttpResponse};

use super::{send, REVIEWS};
use crate::error::AppError;
use crate::extractors::{CurrentIdentity, IdPath, JsonBody};
use crate::state::app_state::AppState;
use crate::store::{filter_id, Filter};

async fn list_reviews(
    _identity: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(REVIEWS, Filter::new()).await?)
}

/// Returns an array (zero or one element), not a single document.
async fn get_review(id: IdPath, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(REVIEWS, filter_id(&id.0)).await?)
}

async fn add_review(
    body: JsonBody,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review = body.into_document()?;
    send(app_state.store().insert_one(REVIEWS, review).await?)
}

async fn update_review(
    body: JsonBody,
    id: IdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes = body.into_document()?;
    tracing::debug!(review_id = %id.0, fields = changes.len(), "updating review");
    send(
        app_state
            .store()
            .update_one(REVIEWS, filter_id(&id.0), changes, false)
            .await?,
    )
}

async fn delete_review(id: IdPath, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().delete_one(REVIEWS, filter_id(&id.0)).await?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/reviews")
            .route(web::get().to(list_reviews))
            .route(web::post().to(add_review)),
    )
    .service(
        web::resource("/reviews/{id}")
            .route(web::get().to(get_review))
            .route(web::patch().to(update_review))
            .route(web::delete().to(delete_review)),
    );
}
