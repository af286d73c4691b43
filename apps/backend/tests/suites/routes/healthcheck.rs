use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::support::TestContext;

#[actix_web::test]
async fn root_banner() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html")));
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Meal Lounge server is running");
}

#[actix_web::test]
async fn health_reports_store_status() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
    assert!(body.get("store_error").is_none());
    assert!(body["app_version"].is_string());
    assert!(body["time"].is_string());
}
