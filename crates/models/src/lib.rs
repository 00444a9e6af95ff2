//! Entities, field rules and the document table of the vehicle shop.

pub mod errors;
pub mod db;
pub mod object_id;
pub mod schema;
pub mod stored;
pub mod vehicle;
pub mod car;
pub mod motorcycle;
pub mod number;
pub mod document;

pub use car::{Car, CarSchema};
pub use motorcycle::{Category, Motorcycle, MotorcycleSchema};
pub use object_id::ObjectId;
pub use schema::{FieldError, Schema, ValidationError};
pub use stored::{Resource, Stored};
pub use vehicle::Vehicle;

#[cfg(test)]
mod tests;
