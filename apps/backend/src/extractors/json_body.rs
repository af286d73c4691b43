use actix_web::dev::Payload;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::StreamExt;
use serde_json::error::Category;
use serde_json::{Error as JsonError, Map, Value};
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::store::Document;

/// Largest accepted body.
pub const BODY_LIMIT: usize = 100 * 1024;

/// Loosely-typed JSON request body.
///
/// JSON bodies must parse to an object or an array. Urlencoded form bodies
/// read as a flat object of strings, a repeated key becoming an array.
/// Any other content type, and an empty body, reads as `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl JsonBody {
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Top-level field, if the body is an object carrying it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }

    /// The body as a document; arrays are rejected.
    pub fn into_document(self) -> Result<Document, AppError> {
        match self.0 {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Expected a JSON object",
            )),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &HttpRequest) -> BodyKind {
    let mime = req.content_type();
    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

/// Decode `a=1&b=2&b=3` into `{"a": "1", "b": ["2", "3"]}`.
fn parse_form(body: &[u8]) -> Result<Value, AppError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).map_err(|e| {
        debug!(error = %e, "form body parsing failed");
        AppError::bad_request(ErrorCode::BadRequest, "Invalid form body")
    })?;

    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    Ok(Value::Object(fields))
}

impl FromRequest for JsonBody {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let kind = body_kind(req);
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > BODY_LIMIT {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            if kind == BodyKind::Other || body.iter().all(u8::is_ascii_whitespace) {
                return Ok(JsonBody(Value::Object(Map::new())));
            }
            if kind == BodyKind::Form {
                return parse_form(&body).map(JsonBody);
            }

            let value: Value = serde_json::from_slice(&body).map_err(|e| {
                debug!(body_size = body.len(), "JSON parsing failed");
                AppError::bad_request(ErrorCode::InvalidJson, classify_json_error(&e))
            })?;

            match value {
                Value::Object(_) | Value::Array(_) => Ok(JsonBody(value)),
                _ => Err(AppError::bad_request(
                    ErrorCode::InvalidJson,
                    "Invalid JSON: body must be an object or an array",
                )),
            }
        })
    }
}

/// Sanitized parse failure message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: wrong types for one or more fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
