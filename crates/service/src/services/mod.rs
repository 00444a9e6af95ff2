//! Services of the two resource kinds, built on [`VehicleService`].

pub mod vehicle_service;

use std::sync::Arc;

use models::{Car, CarSchema, Motorcycle, MotorcycleSchema};

use crate::storage::DocumentStore;
pub use vehicle_service::VehicleService;

pub type CarService = VehicleService<Car>;
pub type MotorcycleService = VehicleService<Motorcycle>;

pub fn car_service(store: Arc<dyn DocumentStore<Car>>) -> CarService {
    VehicleService::new(store, CarSchema)
}

pub fn motorcycle_service(store: Arc<dyn DocumentStore<Motorcycle>>) -> MotorcycleService {
    VehicleService::new(store, MotorcycleSchema)
}
