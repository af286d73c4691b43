use meal_lounge::store::{Document, MemoryDocumentStore, ObjectId, ID_FIELD};
use serde_json::Value;

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Seed one document with a fresh id and return that id.
pub fn seed_one(store: &MemoryDocumentStore, collection: &str, value: Value) -> ObjectId {
    let id = ObjectId::new();
    let mut document = doc(value);
    document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
    store.seed(collection, [document]);
    id
}

pub fn seed_user(store: &MemoryDocumentStore, email: &str, role: Option<&str>) -> ObjectId {
    let mut user = serde_json::json!({ "email": email, "name": "Test User" });
    if let Some(role) = role {
        user["role"] = Value::from(role);
    }
    seed_one(store, "users", user)
}
