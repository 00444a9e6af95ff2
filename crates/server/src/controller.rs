//! HTTP face of a [`VehicleService`]: id checks, status codes and bodies.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use models::{Car, Motorcycle, ObjectId, Resource, Stored};
use serde_json::Value;
use service::services::{CarService, MotorcycleService, VehicleService};

use crate::errors::ApiError;

pub const CARS_PATH: &str = "/cars";
pub const MOTORCYCLES_PATH: &str = "/motorcycles";

/// A service plus the path its five routes are mounted under.
pub struct Controller<T: Resource> {
    service: VehicleService<T>,
    path: String,
}

impl<T: Resource> Clone for Controller<T> {
    fn clone(&self) -> Self {
        Self { service: self.service.clone(), path: self.path.clone() }
    }
}

impl<T: Resource> Controller<T> {
    pub fn new(service: VehicleService<T>, path: impl Into<String>) -> Self {
        Self { service, path: path.into() }
    }

    pub fn path(&self) -> &str { &self.path }

    pub fn service(&self) -> &VehicleService<T> { &self.service }
}

pub fn car_controller(service: CarService) -> Controller<Car> {
    Controller::new(service, CARS_PATH)
}

pub fn motorcycle_controller(service: MotorcycleService) -> Controller<Motorcycle> {
    Controller::new(service, MOTORCYCLES_PATH)
}

// an undecodable segment is as malformed as a wrong-length one
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<ObjectId, ApiError> {
    let Path(raw) = path.map_err(|_| ApiError::InvalidId)?;
    raw.parse().map_err(|_| ApiError::InvalidId)
}

pub async fn create<T: Resource>(
    State(ctl): State<Controller<T>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored<T>>), ApiError> {
    let Json(input) = body?;
    let created = ctl.service.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read<T: Resource>(State(ctl): State<Controller<T>>) -> Result<Json<Vec<Stored<T>>>, ApiError> {
    Ok(Json(ctl.service.read().await?))
}

pub async fn read_one<T: Resource>(
    State(ctl): State<Controller<T>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Stored<T>>, ApiError> {
    let id = parse_id(path)?;
    let found = ctl.service.read_one(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(found))
}

pub async fn update<T: Resource>(
    State(ctl): State<Controller<T>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Stored<T>>, ApiError> {
    // id shape is checked before the body
    let id = parse_id(path)?;
    let Json(input) = body?;
    let Value::Object(fields) = input else {
        return Err(ApiError::BadRequest("Request body must be a JSON object".into()));
    };
    let updated = ctl.service.update(&id, fields).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

pub async fn delete<T: Resource>(
    State(ctl): State<Controller<T>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(path)?;
    ctl.service.delete(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}
