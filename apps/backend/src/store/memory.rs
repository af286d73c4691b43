use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{
    apply_set, assign_id, matches, upsert_seed, DeleteResult, Document, DocumentStore, Filter,
    InsertOneResult, ObjectId, StoreError, UpdateResult, ID_FIELD,
};

/// Process-local Document Store.
///
/// Collections are created on first insert. Uniqueness is enforced for `_id`
/// and for `email` within the `users` collection, matching the Postgres
/// schema.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert without going through the async trait; handy for test setup.
    pub fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection.to_string()).or_default();
        for mut document in documents {
            if assign_id(&mut document).is_ok() {
                docs.push(document);
            }
        }
    }

    /// Number of documents currently in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn unique_violation(docs: &[Document], collection: &str, candidate: &Document) -> Option<String> {
    let id = candidate.get(ID_FIELD);
    if docs.iter().any(|d| d.get(ID_FIELD) == id) {
        return Some(format!("{collection} _id {}", id.unwrap_or(&Value::Null)));
    }
    email_conflict(docs.iter(), collection, candidate)
}

/// `users.email` is unique among non-null values.
fn email_conflict<'a>(
    mut others: impl Iterator<Item = &'a Document>,
    collection: &str,
    candidate: &Document,
) -> Option<String> {
    if collection != "users" {
        return None;
    }
    let email = candidate.get("email").filter(|e| !e.is_null())?;
    others
        .any(|d| d.get("email") == Some(email))
        .then(|| format!("users email {email}"))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(&self, collection: &str, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        let id = assign_id(&mut document)?;

        let mut guard = self.collections.write();
        let docs = guard.entry(collection.to_string()).or_default();
        if let Some(conflict) = unique_violation(docs, collection, &document) {
            return Err(StoreError::DuplicateKey(conflict));
        }
        docs.push(document);

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection.to_string()).or_default();

        if let Some(position) = docs.iter().position(|d| matches(d, &filter)) {
            let mut updated = docs[position].clone();
            let changed = apply_set(&mut updated, set)?;
            let others = docs
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, d)| d);
            if let Some(conflict) = email_conflict(others, collection, &updated) {
                return Err(StoreError::DuplicateKey(conflict));
            }
            docs[position] = updated;
            return Ok(UpdateResult::matched(changed));
        }

        if !upsert {
            return Ok(UpdateResult::unmatched());
        }

        let id = ObjectId::new().to_hex();
        let document = upsert_seed(&filter, set, &id);
        if let Some(conflict) = unique_violation(docs, collection, &document) {
            return Err(StoreError::DuplicateKey(conflict));
        }
        docs.push(document);
        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<DeleteResult, StoreError> {
        let mut guard = self.collections.write();
        let deleted_count = match guard.get_mut(collection) {
            Some(docs) => match docs.iter().position(|d| matches(d, &filter)) {
                Some(position) => {
                    docs.remove(position);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
