//! Membership packages and upcoming meals; read-only.

use actix_web::{web, HttpResponse};

use super::{send, MEMBERSHIPS, UPCOMING};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::store::{filter_eq, Filter};

async fn list_memberships(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(MEMBERSHIPS, Filter::new()).await?)
}

async fn get_package(
    package: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    send(
        app_state
            .store()
            .find_one(MEMBERSHIPS, filter_eq("packageName", package.into_inner()))
            .await?,
    )
}

async fn list_upcoming(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(UPCOMING, Filter::new()).await?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/memberships", web::get().to(list_memberships))
        .route("/membership/{package}", web::get().to(get_package))
        .route("/upcoming", web::get().to(list_upcoming));
}
