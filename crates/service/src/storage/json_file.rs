use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::{ObjectId, Resource, Stored};
use serde_json::{Map, Value};
use tokio::{fs, sync::RwLock};

use super::{apply_fields, DocumentStore};
use crate::errors::ServiceError;

/// JSON file-backed collection.
///
/// Keeps the documents of one collection in memory as an ordered array and
/// rewrites `<data_dir>/<collection>.json` after every mutation. Suited to
/// single-process deployments where a database is overkill.
pub struct JsonFileDocumentStore<T> {
    inner: RwLock<Vec<Stored<T>>>,
    file_path: PathBuf,
}

impl<T: Resource> JsonFileDocumentStore<T> {
    /// Open the store at `path`, creating the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }

        let docs: Vec<Stored<T>> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Decode(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await.map_err(|e| ServiceError::Db(e.to_string()))?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::Db(e.to_string())),
        };

        tracing::debug!(path = %file_path.display(), count = docs.len(), "json document store loaded");
        Ok(Self { inner: RwLock::new(docs), file_path })
    }

    /// Open `<data_dir>/<collection>.json`.
    pub async fn for_collection(data_dir: impl AsRef<Path>) -> Result<Self, ServiceError> {
        Self::new(data_dir.as_ref().join(format!("{}.json", T::COLLECTION))).await
    }

    pub fn path(&self) -> &Path { &self.file_path }

    // called with the write guard held so saves land in mutation order
    async fn save(&self, docs: &[Stored<T>]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(docs)?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for JsonFileDocumentStore<T> {
    async fn find(&self) -> Result<Vec<Stored<T>>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        let docs = self.inner.read().await;
        Ok(docs.iter().find(|d| &d.id == id).cloned())
    }

    async fn insert(&self, doc: T) -> Result<Stored<T>, ServiceError> {
        let stored = Stored::new(ObjectId::new(), doc);
        let mut docs = self.inner.write().await;
        docs.push(stored.clone());
        if let Err(e) = self.save(&docs).await {
            docs.pop();
            return Err(e);
        }
        Ok(stored)
    }

    async fn update_by_id(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError> {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| &d.id == id) else { return Ok(None) };
        let merged = apply_fields(&docs[pos].doc, fields)?;
        let previous = std::mem::replace(&mut docs[pos].doc, merged);
        if let Err(e) = self.save(&docs).await {
            docs[pos].doc = previous;
            return Err(e);
        }
        Ok(Some(docs[pos].clone()))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| &d.id == id) else { return Ok(None) };
        let removed = docs.remove(pos);
        if let Err(e) = self.save(&docs).await {
            docs.insert(pos, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}
