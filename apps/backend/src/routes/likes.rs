use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::{leave_unanswered, send, LIKES};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::state::app_state::AppState;
use crate::store::{Document, Filter};

/// Decide whether a like posted for `email` is recorded.
///
/// The body is `{param1, param2, param3}`: `param2` is the meal title and
/// `param3` the like record itself. The record is kept when it belongs to
/// `email` or a title was supplied.
pub fn like_to_record(email: &str, body: &JsonBody) -> Option<Document> {
    let record = body.field("param3")?.as_object()?;

    let owned = record.get("email").and_then(Value::as_str) == Some(email);
    let titled = body.field("param2").is_some_and(is_truthy);

    (owned || titled).then(|| record.clone())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

async fn add_like(
    email: web::Path<String>,
    body: JsonBody,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let Some(record) = like_to_record(&email, &body) else {
        return leave_unanswered("POST /likes/{email}", "like not attributable").await;
    };

    send(app_state.store().insert_one(LIKES, record).await?)
}

async fn list_likes(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send(app_state.store().find(LIKES, Filter::new()).await?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/likes/{email}", web::post().to(add_like))
        .route("/likes", web::get().to(list_likes));
}
