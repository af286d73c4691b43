//! Postgres-backed Document Store.
//!
//! Every collection lives in the single `documents` table; `_id` is the key
//! column and the remaining fields are the `body` jsonb. Field filters use
//! jsonb containment, so a filter value of `null` only matches an explicit
//! null, not a missing field.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, SqlErr,
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use super::{
    apply_set, assign_id, upsert_seed, DeleteResult, Document, DocumentStore, Filter,
    InsertOneResult, ObjectId, StoreError, UpdateResult, ID_FIELD,
};
use crate::entities::documents;

#[derive(Debug, Clone)]
pub struct SeaDocumentStore {
    db: DatabaseConnection,
}

impl SeaDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn first_match(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<documents::Model>, StoreError> {
        Ok(scoped(collection, filter).one(&self.db).await?)
    }

    async fn insert_row(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        let id = assign_id(&mut document)?;
        document.remove(ID_FIELD);

        let row = documents::ActiveModel {
            id: Set(id.clone()),
            collection: Set(collection.to_string()),
            body: Set(Value::Object(document)),
            created_at: Set(OffsetDateTime::now_utc()),
        };

        row.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::DuplicateKey(detail),
            _ => StoreError::Db(e),
        })?;

        Ok(id)
    }
}

/// Base query for one collection narrowed by `filter`, oldest first.
fn scoped(collection: &str, filter: &Filter) -> Select<documents::Entity> {
    let mut query =
        documents::Entity::find().filter(documents::Column::Collection.eq(collection));

    let mut fields = filter.clone();
    if let Some(id) = fields.remove(ID_FIELD) {
        let id = match id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        query = query.filter(documents::Column::Id.eq(id));
    }
    if !fields.is_empty() {
        query = query.filter(Expr::cust_with_values(
            "body @> ?::jsonb",
            [Value::Object(fields)],
        ));
    }

    query
        .order_by_asc(documents::Column::CreatedAt)
        .order_by_asc(documents::Column::Id)
}

fn to_document(model: documents::Model) -> Result<Document, StoreError> {
    match model.body {
        Value::Object(mut body) => {
            body.insert(ID_FIELD.to_string(), Value::String(model.id));
            Ok(body)
        }
        _ => Err(StoreError::Corrupt(model.id)),
    }
}

#[async_trait]
impl DocumentStore for SeaDocumentStore {
    async fn find(&self, collection: &str, filter: Filter) -> Result<Vec<Document>, StoreError> {
        scoped(collection, &filter)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_document)
            .collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.first_match(collection, &filter)
            .await?
            .map(to_document)
            .transpose()
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        let inserted_id = self.insert_row(collection, document).await?;
        debug!(collection, id = %inserted_id, "document inserted");

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        let Some(model) = self.first_match(collection, &filter).await? else {
            if !upsert {
                return Ok(UpdateResult::unmatched());
            }
            let id = ObjectId::new().to_hex();
            self.insert_row(collection, upsert_seed(&filter, set, &id))
                .await?;
            return Ok(UpdateResult::upserted(id));
        };

        let mut document = to_document(model.clone())?;
        let changed = apply_set(&mut document, set)?;
        if changed {
            document.remove(ID_FIELD);
            let mut row: documents::ActiveModel = model.into();
            row.body = Set(Value::Object(document));
            row.update(&self.db).await?;
        }

        Ok(UpdateResult::matched(changed))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<DeleteResult, StoreError> {
        let deleted_count = match self.first_match(collection, &filter).await? {
            Some(model) => {
                documents::Entity::delete_by_id(model.id)
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .ping()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
