//! Document Store seam.
//!
//! Resource handlers talk to collections through [`DocumentStore`]; the
//! process picks a concrete backend at startup (`SeaDocumentStore` for
//! Postgres, `MemoryDocumentStore` for tests and throwaway local runs).
//! Result types serialize to the driver's native camelCase shapes because
//! handlers return them to clients unmodified.

pub mod memory;
pub mod object_id;
pub mod sea;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use object_id::ObjectId;
pub use sea::SeaDocumentStore;

/// A stored record: a JSON object whose `_id` is the primary key.
pub type Document = Map<String, Value>;

/// Equality filter over top-level fields. An empty filter matches everything.
pub type Filter = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("input must be a 24 character hex string: {0}")]
    InvalidId(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("performing an update on the path '_id' would modify the immutable field '_id'")]
    ImmutableId,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("stored document is not a JSON object (id {0})")]
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl UpdateResult {
    fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Self::unmatched()
        }
    }

    fn upserted(id: String) -> Self {
        Self {
            upserted_count: 1,
            upserted_id: Some(id),
            ..Self::unmatched()
        }
    }
}

/// Collection-oriented persistence. Every call is one independent round trip;
/// there are no transactions across calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`, in insertion order.
    async fn find(&self, collection: &str, filter: Filter) -> Result<Vec<Document>, StoreError>;

    /// First matching document, if any.
    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert `document`, generating an `_id` when absent.
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOneResult, StoreError>;

    /// Merge `set` into the first match (`$set`). With `upsert` and no match,
    /// insert `filter ∪ set` under a fresh id.
    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError>;

    /// Delete the first match.
    async fn delete_one(&self, collection: &str, filter: Filter)
        -> Result<DeleteResult, StoreError>;

    /// Cheap liveness check for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Single-field filter helper: `filter_eq("email", "a@x.com")`.
pub fn filter_eq(field: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(field.to_string(), value.into());
    filter
}

/// Filter on the primary key.
pub fn filter_id(id: &ObjectId) -> Filter {
    filter_eq(ID_FIELD, id.to_hex())
}

/// True when every filter field equals the document's top-level field.
/// A filter value of `null` also matches a missing field.
pub fn matches(document: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => actual == expected,
        None => expected.is_null(),
    })
}

/// Shallow `$set` merge. Returns whether any field changed.
pub fn apply_set(document: &mut Document, set: Document) -> Result<bool, StoreError> {
    if let Some(new_id) = set.get(ID_FIELD) {
        if document.get(ID_FIELD) != Some(new_id) {
            return Err(StoreError::ImmutableId);
        }
    }

    let mut changed = false;
    for (key, value) in set {
        if document.get(&key) != Some(&value) {
            document.insert(key, value);
            changed = true;
        }
    }
    Ok(changed)
}

/// Resolve the primary key for an incoming document: keep a provided
/// string `_id`, generate one otherwise.
pub fn assign_id(document: &mut Document) -> Result<String, StoreError> {
    match document.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Err(StoreError::InvalidId(other.to_string())),
        None => {
            let id = ObjectId::new().to_hex();
            document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}

/// Seed document for an upsert: the filter's equality fields under `id`,
/// then `set` merged on top.
pub fn upsert_seed(filter: &Filter, set: Document, id: &str) -> Document {
    let mut document: Document = filter
        .iter()
        .filter(|(key, _)| key.as_str() != ID_FIELD)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    for (key, value) in set {
        if key != ID_FIELD {
            document.insert(key, value);
        }
    }
    document
}
