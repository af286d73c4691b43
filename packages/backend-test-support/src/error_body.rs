//! Assertions for the backend's error contract without depending on backend
//! types: JSON body `{message, code, trace_id}` plus an `x-trace-id` header
//! carrying the same trace id.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert status, code and message of an error response, and that the body's
/// trace id matches the `x-trace-id` header. Returns the parsed body.
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let header_trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| panic!("x-trace-id header missing or not UTF-8"));
    assert!(!header_trace_id.is_empty(), "x-trace-id header is empty");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body is not {{message, code, trace_id}} ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert_eq!(parsed.code, expected_code, "unexpected error code");
    assert_eq!(parsed.message, expected_message, "unexpected error message");
    assert_eq!(
        parsed.trace_id, header_trace_id,
        "body trace_id must match x-trace-id header"
    );

    parsed
}

/// Same as [`assert_error_body_from_parts`] for a complete `HttpResponse`.
pub async fn assert_error_body_from_http_response(
    resp: actix_web::HttpResponse,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: &str,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("failed to read response body"));

    assert_error_body_from_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_message,
    )
}
