//! Generic CRUD over one resource collection.

use std::sync::Arc;

use models::{ObjectId, Resource, Schema, Stored};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;

/// Validates input with the resource's [`Schema`] and delegates storage to a
/// [`DocumentStore`]. One instance serves one collection.
///
/// ```
/// use std::sync::Arc;
/// use service::services::car_service;
/// use service::storage::MemoryDocumentStore;
///
/// let cars = car_service(Arc::new(MemoryDocumentStore::<models::Car>::new()));
/// let created = tokio_test::block_on(cars.create(&serde_json::json!({
///     "model": "Fiat Uno", "year": 2003, "color": "blue",
///     "buyValue": 3500, "doorsQty": 2, "seatsQty": 5
/// })))
/// .unwrap();
/// assert_eq!(created.doc.doors_qty, 2.0);
/// ```
pub struct VehicleService<T: Resource> {
    store: Arc<dyn DocumentStore<T>>,
    schema: Arc<dyn Schema<Output = T>>,
}

impl<T: Resource> Clone for VehicleService<T> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), schema: Arc::clone(&self.schema) }
    }
}

impl<T: Resource> VehicleService<T> {
    pub fn new(store: Arc<dyn DocumentStore<T>>, schema: impl Schema<Output = T> + 'static) -> Self {
        Self { store, schema: Arc::new(schema) }
    }

    /// Validate and persist; nothing is written when validation fails.
    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    pub async fn create(&self, input: &Value) -> Result<Stored<T>, ServiceError> {
        let doc = self.schema.validate(input).map_err(ServiceError::Validation)?;
        let created = self.store.insert(doc).await?;
        info!(id = %created.id, "document created");
        Ok(created)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    pub async fn read(&self) -> Result<Vec<Stored<T>>, ServiceError> {
        self.store.find().await
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %id))]
    pub async fn read_one(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        self.store.find_by_id(id).await
    }

    /// Replace the given top-level fields as-is. The field rules of
    /// [`create`](Self::create) are not applied here; only the stored shape
    /// of `T` must still hold.
    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %id))]
    pub async fn update(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Stored<T>>, ServiceError> {
        let updated = self.store.update_by_id(id, fields).await?;
        if updated.is_some() {
            info!("document updated");
        }
        Ok(updated)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %id))]
    pub async fn delete(&self, id: &ObjectId) -> Result<Option<Stored<T>>, ServiceError> {
        let removed = self.store.delete_by_id(id).await?;
        if removed.is_some() {
            info!("document deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{car_service, motorcycle_service};
    use crate::storage::MemoryDocumentStore;
    use crate::test_support::FailingStore;
    use models::{Car, Category, Motorcycle};
    use serde_json::json;

    fn car_input() -> Value {
        json!({
            "model": "Ferrari Maranello", "year": 1963, "color": "red",
            "buyValue": 3500000, "doorsQty": 2, "seatsQty": 2
        })
    }

    fn fields(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_then_read_back() -> Result<(), anyhow::Error> {
        let svc = car_service(Arc::new(MemoryDocumentStore::<Car>::new()));
        let created = svc.create(&car_input()).await?;
        assert_eq!(created.doc.vehicle.model, "Ferrari Maranello");
        assert_eq!(created.doc.vehicle.status, None);

        assert_eq!(svc.read_one(&created.id).await?, Some(created.clone()));
        assert_eq!(svc.read().await?, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_not_stored() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryDocumentStore::<Car>::new());
        let svc = car_service(store.clone());

        let mut input = car_input();
        input["doorsQty"] = json!(1);
        input["model"] = json!("");
        let err = svc.create(&input).await.unwrap_err();
        let ServiceError::Validation(issues) = &err else { panic!("expected validation error, got {err:?}") };
        assert!(issues.has_message("Doors quantity must be 2 or higher"));
        assert!(issues.has_message("Model must not be empty"));
        assert_eq!(store.len().await, 0);

        let err = svc.create(&json!({})).await.unwrap_err();
        assert!(err.is_validation());
        Ok(())
    }

    #[tokio::test]
    async fn update_skips_field_rules() -> Result<(), anyhow::Error> {
        let svc = car_service(Arc::new(MemoryDocumentStore::<Car>::new()));
        let created = svc.create(&car_input()).await?;

        let updated = svc.update(&created.id, fields(json!({"doorsQty": 1, "status": true}))).await?.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.doc.doors_qty, 1.0);
        assert_eq!(updated.doc.vehicle.status, Some(true));
        assert_eq!(svc.read_one(&created.id).await?, Some(updated));

        // out-of-range and fractional numbers are stored as given
        let updated = svc
            .update(&created.id, fields(json!({"buyValue": -1, "doorsQty": 2.5, "year": 70000})))
            .await?
            .unwrap();
        assert_eq!(updated.doc.vehicle.buy_value, -1.0);
        assert_eq!(updated.doc.doors_qty, 2.5);
        assert_eq!(updated.doc.vehicle.year, 70000.0);

        // only a value of the wrong type is refused
        let err = svc.update(&created.id, fields(json!({"doorsQty": "four"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        Ok(())
    }

    #[tokio::test]
    async fn fractional_prices_and_capacities_are_accepted() -> Result<(), anyhow::Error> {
        let cars = car_service(Arc::new(MemoryDocumentStore::<Car>::new()));
        let mut input = car_input();
        input["buyValue"] = json!(3500.5);
        input["model"] = json!("Ka");
        let car = cars.create(&input).await?;
        assert_eq!(car.doc.vehicle.buy_value, 3500.5);

        let motorcycles = motorcycle_service(Arc::new(MemoryDocumentStore::<Motorcycle>::new()));
        let moto = motorcycles
            .create(&json!({
                "model": "Honda CG Titan 125", "year": 1963, "color": "red",
                "buyValue": 3500, "category": "Street", "engineCapacity": 124.9
            }))
            .await?;
        assert_eq!(moto.doc.engine_capacity, 124.9);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_none_and_delete_is_idempotent() -> Result<(), anyhow::Error> {
        let svc = motorcycle_service(Arc::new(MemoryDocumentStore::<Motorcycle>::new()));
        let created = svc
            .create(&json!({
                "model": "Honda CG Titan 125", "year": 1963, "color": "red",
                "buyValue": 3500, "category": "Street", "engineCapacity": 125
            }))
            .await?;
        assert_eq!(created.doc.category, Category::Street);

        let other: ObjectId = "625748f82d58a7817a3afc48".parse()?;
        assert!(svc.read_one(&other).await?.is_none());
        assert!(svc.update(&other, Map::new()).await?.is_none());

        assert_eq!(svc.delete(&created.id).await?, Some(created.clone()));
        assert!(svc.delete(&created.id).await?.is_none());
        assert!(svc.read().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let svc = car_service(Arc::new(FailingStore));
        let id = ObjectId::new();
        assert!(matches!(svc.read().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.read_one(&id).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.create(&car_input()).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.delete(&id).await, Err(ServiceError::Db(_))));
        // validation runs before the store is touched
        assert!(svc.create(&json!([])).await.unwrap_err().is_validation());
    }
}
