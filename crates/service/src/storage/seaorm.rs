use std::marker::PhantomData;

use async_trait::async_trait;
use models::{document, ObjectId, Resource, Stored};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use super::{apply_fields, DocumentStore};
use crate::errors::ServiceError;

/// Collection stored as rows of the `document` table.
#[derive(Clone)]
pub struct SeaOrmDocumentStore<T> {
    db: DatabaseConnection,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Resource> SeaOrmDocumentStore<T> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _kind: PhantomData }
    }

    fn decode(row: document::Model) -> Result<Stored<T>, ServiceError> {
        let id: ObjectId = row
            .id
            .parse()
            .map_err(|_| ServiceError::Decode(format!("invalid document id `{}`", row.id)))?;
        let doc: T = serde_json::from_value(row.body)?;
        Ok(Stored::new(id, doc))
    }
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for SeaOrmDocumentStore<T> {
    async fn find(&self) -> Result<Vec<Stored<T>>, ServiceError> {
        let rows = document::list(&self.db, T::COLLECTION).await?;
        rows.into_iter().map(Self::decode).collect()
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        document::find(&self.db, T::COLLECTION, id).await?.map(Self::decode).transpose()
    }

    async fn insert(&self, doc: T) -> Result<Stored<T>, ServiceError> {
        let body = serde_json::to_value(&doc)?;
        let row = document::insert(&self.db, T::COLLECTION, body).await?;
        Self::decode(row)
    }

    async fn update_by_id(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError> {
        let Some(row) = document::find(&self.db, T::COLLECTION, id).await? else { return Ok(None) };
        let current: T = serde_json::from_value(row.body.clone())?;
        let merged = apply_fields(&current, fields)?;
        let row = document::replace_body(&self.db, row, serde_json::to_value(&merged)?).await?;
        Self::decode(row).map(Some)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        document::delete(&self.db, T::COLLECTION, id).await?.map(Self::decode).transpose()
    }
}
