use actix_web::test;
use serde_json::{json, Value};

use crate::common::UNANSWERED_AFTER;
use crate::support::TestContext;

#[actix_web::test]
async fn own_like_is_recorded() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let req = test::TestRequest::post()
        .uri("/likes/a@x.com")
        .set_json(json!({"param1": 1, "param3": {"email": "a@x.com", "title": "Ramen"}}))
        .to_request();
    let result: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(result["acknowledged"], true);

    let likes: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/likes").to_request()).await,
    )
    .await;
    assert_eq!(likes[0]["title"], "Ramen");
    assert_eq!(likes[0]["_id"], result["insertedId"]);
}

#[actix_web::test]
async fn unattributable_like_is_never_answered() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    for body in [
        json!({"param3": {"email": "b@x.com"}}),
        json!({"param2": "", "param3": {"email": "b@x.com"}}),
        json!({"param2": "Ramen"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/likes/a@x.com")
            .set_json(body)
            .to_request();
        let outcome = tokio::time::timeout(UNANSWERED_AFTER, test::call_service(&app, req)).await;
        assert!(outcome.is_err());
    }
    assert!(ctx.store.is_empty("likes"));
}
