use actix_web::{web, HttpResponse};

use super::{send, SUBSCRIBERS};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::state::app_state::AppState;

async fn subscribe(
    body: JsonBody,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let subscriber = body.into_document()?;
    send(app_state.store().insert_one(SUBSCRIBERS, subscriber).await?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/subscribers", web::post().to(subscribe));
}
