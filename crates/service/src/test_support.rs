#![cfg(test)]
use async_trait::async_trait;
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::{ObjectId, Resource, Stored};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub fn db_tests_disabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

fn test_config() -> DatabaseConfig {
    let mut cfg = configs::AppConfig::from_env().database;
    cfg.normalize_from_env();
    cfg.min_connections = 1;
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&test_config()).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    Ok(connect_with_config(&test_config()).await?)
}

/// Store whose every call fails as if the database were gone.
pub struct FailingStore;

fn down() -> ServiceError { ServiceError::Db("connection refused".into()) }

#[async_trait]
impl<T: Resource> DocumentStore<T> for FailingStore {
    async fn find(&self) -> Result<Vec<Stored<T>>, ServiceError> { Err(down()) }
    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> { Err(down()) }
    async fn insert(&self, _doc: T) -> Result<Stored<T>, ServiceError> { Err(down()) }
    async fn update_by_id(&self, _id: &ObjectId, _fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError> { Err(down()) }
    async fn delete_by_id(&self, _id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> { Err(down()) }
}
