//! Memberships, upcoming meals, subscribers.

use actix_web::test;
use serde_json::{json, Value};

use crate::support::factory::seed_one;
use crate::support::TestContext;

#[actix_web::test]
async fn memberships_and_packages() {
    let ctx = TestContext::new().await;
    seed_one(&ctx.store, "memberships", json!({"packageName": "silver", "price": 10}));
    seed_one(&ctx.store, "memberships", json!({"packageName": "gold", "price": 20}));
    let app = ctx.app().await;

    let all: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/memberships").to_request())
            .await,
    )
    .await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let gold: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/membership/gold").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(gold["price"], 20);

    let platinum: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/membership/platinum").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(platinum, Value::Null);
}

#[actix_web::test]
async fn upcoming_meals() {
    let ctx = TestContext::new().await;
    seed_one(&ctx.store, "upcoming", json!({"title": "Pho"}));
    let app = ctx.app().await;

    let upcoming: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/upcoming").to_request()).await,
    )
    .await;
    assert_eq!(upcoming[0]["title"], "Pho");
}

#[actix_web::test]
async fn subscribe() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let result: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/subscribers")
                .set_json(json!({"email": "a@x.com"}))
                .to_request(),
        )
        .await,
    )
    .await;

    assert_eq!(result["acknowledged"], true);
    assert_eq!(ctx.store.len("subscribers"), 1);
}
