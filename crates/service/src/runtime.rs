//! Runtime environment helpers
//!
//! Picks the document store for the configured backend so binary crates
//! only deal with `service::runtime`.

use std::{path::PathBuf, sync::Arc};

use models::Resource;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::storage::{DocumentStore, JsonFileDocumentStore, MemoryDocumentStore, SeaOrmDocumentStore};

/// An opened storage backend, ready to hand out one store per collection.
#[derive(Clone)]
pub enum Backend {
    Postgres(DatabaseConnection),
    File(PathBuf),
    Memory,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Postgres(_) => "postgres",
            Backend::File(_) => "file",
            Backend::Memory => "memory",
        }
    }

    pub async fn open<T: Resource>(&self) -> Result<Arc<dyn DocumentStore<T>>, ServiceError> {
        let store: Arc<dyn DocumentStore<T>> = match self {
            Backend::Postgres(db) => Arc::new(SeaOrmDocumentStore::<T>::new(db.clone())),
            Backend::File(dir) => Arc::new(JsonFileDocumentStore::<T>::for_collection(dir).await?),
            Backend::Memory => Arc::new(MemoryDocumentStore::<T>::new()),
        };
        tracing::debug!(backend = self.name(), collection = T::COLLECTION, "document store opened");
        Ok(store)
    }
}

/// Ensure the data directory of the file backend exists.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
