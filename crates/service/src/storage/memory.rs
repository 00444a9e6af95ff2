use async_trait::async_trait;
use models::{ObjectId, Resource, Stored};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{apply_fields, DocumentStore};
use crate::errors::ServiceError;

/// Process-local collection kept in insertion order.
pub struct MemoryDocumentStore<T> {
    docs: RwLock<Vec<Stored<T>>>,
}

impl<T> Default for MemoryDocumentStore<T> {
    fn default() -> Self { Self { docs: RwLock::new(Vec::new()) } }
}

impl<T: Resource> MemoryDocumentStore<T> {
    pub fn new() -> Self { Self::default() }

    /// Seed the collection, e.g. for tests.
    pub fn with_documents(docs: Vec<Stored<T>>) -> Self {
        Self { docs: RwLock::new(docs) }
    }

    pub async fn len(&self) -> usize { self.docs.read().await.len() }
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for MemoryDocumentStore<T> {
    async fn find(&self) -> Result<Vec<Stored<T>>, ServiceError> {
        Ok(self.docs.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| &d.id == id).cloned())
    }

    async fn insert(&self, doc: T) -> Result<Stored<T>, ServiceError> {
        let stored = Stored::new(ObjectId::new(), doc);
        self.docs.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError> {
        let mut docs = self.docs.write().await;
        let Some(existing) = docs.iter_mut().find(|d| &d.id == id) else { return Ok(None) };
        existing.doc = apply_fields(&existing.doc, fields)?;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        let mut docs = self.docs.write().await;
        let removed = docs.iter().position(|d| &d.id == id).map(|pos| docs.remove(pos));
        Ok(removed)
    }
}
