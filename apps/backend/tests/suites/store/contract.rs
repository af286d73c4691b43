use meal_lounge::store::{
    filter_eq, filter_id, DocumentStore, Filter, MemoryDocumentStore, ObjectId, StoreError,
};
use serde_json::{json, Value};

use crate::support::factory::doc;

fn store() -> Box<dyn DocumentStore> {
    Box::new(MemoryDocumentStore::new())
}

#[tokio::test]
async fn insert_generates_object_ids() {
    let store = store();

    let result = store
        .insert_one("meals", doc(json!({"title": "Ramen"})))
        .await
        .unwrap();

    assert!(result.acknowledged);
    let id = ObjectId::parse(&result.inserted_id).expect("generated id is an ObjectId");
    let found = store.find_one("meals", filter_id(&id)).await.unwrap().unwrap();
    assert_eq!(found["title"], "Ramen");
}

#[tokio::test]
async fn provided_id_is_kept_and_unique() {
    let store = store();
    let id = "65a1b2c3d4e5f60718293a4b";

    let first = store
        .insert_one("meals", doc(json!({"_id": id, "title": "Ramen"})))
        .await
        .unwrap();
    assert_eq!(first.inserted_id, id);

    let err = store
        .insert_one("meals", doc(json!({"_id": id, "title": "Udon"})))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)));
}

#[tokio::test]
async fn null_filter_matches_missing_fields() {
    let store = store();
    store
        .insert_one("meals", doc(json!({"title": "Ramen"})))
        .await
        .unwrap();
    store
        .insert_one("meals", doc(json!({"title": "Udon", "category": "noodles"})))
        .await
        .unwrap();

    let uncategorized = store
        .find("meals", filter_eq("category", Value::Null))
        .await
        .unwrap();

    assert_eq!(uncategorized.len(), 1);
    assert_eq!(uncategorized[0]["title"], "Ramen");
}

#[tokio::test]
async fn update_is_a_shallow_merge() {
    let store = store();
    let inserted = store
        .insert_one(
            "meals",
            doc(json!({"title": "Ramen", "nutrition": {"kcal": 500, "salt": 3}})),
        )
        .await
        .unwrap();
    let id = ObjectId::parse(&inserted.inserted_id).unwrap();

    store
        .update_one("meals", filter_id(&id), doc(json!({"nutrition": {"kcal": 450}})), false)
        .await
        .unwrap();

    let meal = store.find_one("meals", filter_id(&id)).await.unwrap().unwrap();
    // Nested objects are replaced whole, not merged.
    assert_eq!(meal["nutrition"], json!({"kcal": 450}));
    assert_eq!(meal["title"], "Ramen");
}

#[tokio::test]
async fn identical_update_matches_without_modifying() {
    let store = store();
    store
        .insert_one("meals", doc(json!({"title": "Ramen", "likes": 2})))
        .await
        .unwrap();

    let result = store
        .update_one("meals", filter_eq("title", "Ramen"), doc(json!({"likes": 2})), false)
        .await
        .unwrap();

    assert_eq!(result.matched_count, 1);
    assert_eq!(result.modified_count, 0);
}

#[tokio::test]
async fn update_cannot_change_the_id() {
    let store = store();
    store
        .insert_one("meals", doc(json!({"title": "Ramen"})))
        .await
        .unwrap();

    let err = store
        .update_one(
            "meals",
            filter_eq("title", "Ramen"),
            doc(json!({"_id": "65a1b2c3d4e5f60718293a4b"})),
            false,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::ImmutableId));
}

#[tokio::test]
async fn upsert_seeds_from_filter_and_set() {
    let store = store();

    let result = store
        .update_one(
            "users",
            filter_eq("email", "a@x.com"),
            doc(json!({"name": "A"})),
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.upserted_count, 1);
    let user = store
        .find_one("users", filter_eq("email", "a@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user["name"], "A");
    assert_eq!(user["_id"], json!(result.upserted_id));
}

#[tokio::test]
async fn delete_reports_count() {
    let store = store();
    store
        .insert_one("likes", doc(json!({"email": "a@x.com"})))
        .await
        .unwrap();

    let hit = store
        .delete_one("likes", filter_eq("email", "a@x.com"))
        .await
        .unwrap();
    let miss = store
        .delete_one("likes", filter_eq("email", "a@x.com"))
        .await
        .unwrap();

    assert_eq!(hit.deleted_count, 1);
    assert_eq!(miss.deleted_count, 0);
    assert!(store.find("likes", Filter::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn ping_succeeds() {
    assert!(store().ping().await.is_ok());
}
