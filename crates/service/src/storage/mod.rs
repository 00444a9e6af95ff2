//! Persistence adapters for resource collections.
//!
//! [`DocumentStore`] is the seam between the generic service and whatever
//! holds the documents: PostgreSQL through SeaORM, a JSON file per
//! collection, or process memory.

use async_trait::async_trait;
use models::{ObjectId, Resource, Stored};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

pub mod json_file;
pub mod memory;
pub mod seaorm;

pub use json_file::JsonFileDocumentStore;
pub use memory::MemoryDocumentStore;
pub use seaorm::SeaOrmDocumentStore;

/// CRUD primitives of one collection. Missing ids are `Ok(None)`, never errors.
#[async_trait]
pub trait DocumentStore<T: Resource>: Send + Sync {
    /// Every document, in the backend's natural order.
    async fn find(&self) -> Result<Vec<Stored<T>>, ServiceError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError>;

    /// Store a new document; the store assigns its id.
    async fn insert(&self, doc: T) -> Result<Stored<T>, ServiceError>;

    /// Replace the given top-level fields and return the updated document.
    async fn update_by_id(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError>;

    /// Remove a document, returning its last stored state.
    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError>;
}

/// Overlay `fields` on `current`. The result must still decode as `T`;
/// `_id` is never taken from the patch.
pub fn apply_fields<T: Resource>(current: &T, fields: Map<String, Value>) -> Result<T, ServiceError> {
    let mut doc = serde_json::to_value(current)?;
    if let Value::Object(map) = &mut doc {
        for (key, value) in fields {
            if key == "_id" {
                continue;
            }
            map.insert(key, value);
        }
    }
    Ok(serde_json::from_value(doc)?)
}
