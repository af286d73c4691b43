use actix_web::http::StatusCode;
use actix_web::test;
use meal_lounge::store::{filter_id, DocumentStore};
use serde_json::{json, Value};

use crate::support::auth::cookie_for;
use crate::support::factory::{seed_one, seed_user};
use crate::support::TestContext;

#[actix_web::test]
async fn list_and_get_meals() {
    let ctx = TestContext::new().await;
    let ramen = seed_one(&ctx.store, "meals", json!({"title": "Ramen"}));
    seed_one(&ctx.store, "meals", json!({"title": "Udon"}));
    let app = ctx.app().await;

    let all: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/meals").to_request()).await,
    )
    .await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let one: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/meal/{ramen}"))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(one["title"], "Ramen");
    assert_eq!(one["_id"], ramen.to_hex());
}

#[actix_web::test]
async fn missing_meal_is_null_not_404() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/meal/65a1b2c3d4e5f60718293a4b")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn admin_updates_and_deletes_a_meal() {
    let ctx = TestContext::new().await;
    seed_user(&ctx.store, "chef@x.com", Some("admin"));
    let id = seed_one(&ctx.store, "meals", json!({"title": "Ramen", "price": 10}));
    let app = ctx.app().await;

    let update = test::TestRequest::put()
        .uri(&format!("/meal/{id}"))
        .cookie(cookie_for("chef@x.com"))
        .set_json(json!({"price": 12}))
        .to_request();
    let result: Value = test::read_body_json(test::call_service(&app, update).await).await;
    assert_eq!(result["modifiedCount"], 1);

    let stored = ctx
        .store
        .find_one("meals", filter_id(&id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["price"], 12);
    assert_eq!(stored["title"], "Ramen");

    let delete = test::TestRequest::delete()
        .uri(&format!("/meal/{id}"))
        .cookie(cookie_for("chef@x.com"))
        .to_request();
    let result: Value = test::read_body_json(test::call_service(&app, delete).await).await;
    assert_eq!(result, json!({"acknowledged": true, "deletedCount": 1}));
    assert!(ctx.store.is_empty("meals"));
}

#[actix_web::test]
async fn like_sets_client_count_plus_one() {
    let ctx = TestContext::new().await;
    let id = seed_one(&ctx.store, "meals", json!({"title": "Ramen", "likes": 7}));
    let app = ctx.app().await;

    let like = test::TestRequest::patch()
        .uri(&format!("/like-meal/{id}"))
        .cookie(cookie_for("a@x.com"))
        .set_json(json!({"likes": "3"}))
        .to_request();
    let result: Value = test::read_body_json(test::call_service(&app, like).await).await;
    assert_eq!(result["matchedCount"], 1);

    let stored = ctx
        .store
        .find_one("meals", filter_id(&id))
        .await
        .unwrap()
        .unwrap();
    // The client's count wins over the stored one.
    assert_eq!(stored["likes"], 4);
}

#[actix_web::test]
async fn like_without_a_count_stores_null() {
    let ctx = TestContext::new().await;
    let id = seed_one(&ctx.store, "meals", json!({"title": "Ramen", "likes": 7}));
    let app = ctx.app().await;

    let like = test::TestRequest::patch()
        .uri(&format!("/like-meal/{id}"))
        .cookie(cookie_for("a@x.com"))
        .set_json(json!({}))
        .to_request();
    test::call_service(&app, like).await;

    let stored = ctx
        .store
        .find_one("meals", filter_id(&id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["likes"], Value::Null);
}
