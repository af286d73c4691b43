use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::leave_unanswered;
use crate::error::AppError;
use crate::extractors::{CurrentIdentity, JsonBody};
use crate::payments::{price_to_cents, CURRENCY};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntentResponse {
    client_secret: String,
}

async fn create_payment_intent(
    body: JsonBody,
    _identity: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let Some(amount_cents) = price_to_cents(body.field("price")) else {
        return leave_unanswered("POST /create-payment-intent", "no chargeable price").await;
    };

    let intent = app_state
        .payments
        .create_payment_intent(amount_cents, CURRENCY)
        .await?;

    Ok(HttpResponse::Ok().json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-payment-intent", web::post().to(create_payment_intent));
}
