use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldReader, Schema, ValidationError};
use crate::stored::Resource;
use crate::vehicle::Vehicle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Street,
    Custom,
    Trail,
}

impl Category {
    pub const NAMES: [&'static str; 3] = ["Street", "Custom", "Trail"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Street" => Some(Self::Street),
            "Custom" => Some(Self::Custom),
            "Trail" => Some(Self::Trail),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motorcycle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub category: Category,
    #[serde(with = "crate::number")]
    pub engine_capacity: f64,
}

impl Resource for Motorcycle {
    const COLLECTION: &'static str = "motorcycles";
}

/// Field rules for motorcycles: vehicle fields, a category, 1..=2500 engine capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct MotorcycleSchema;

impl Schema for MotorcycleSchema {
    type Output = Motorcycle;

    fn validate(&self, input: &Value) -> Result<Motorcycle, ValidationError> {
        let mut r = FieldReader::new(input);
        let vehicle = Vehicle::read(&mut r);
        let category = r.one_of("category", "Category", &Category::NAMES);
        let engine_capacity = r.number("engineCapacity", "Engine capacity", 1.0, Some(2500.0));

        r.finish(|| {
            Some(Motorcycle {
                vehicle: vehicle?,
                category: Category::from_name(&category?)?,
                engine_capacity: engine_capacity?,
            })
        })
    }
}
