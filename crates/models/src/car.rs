use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldReader, Schema, ValidationError};
use crate::stored::Resource;
use crate::vehicle::Vehicle;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(with = "crate::number")]
    pub doors_qty: f64,
    #[serde(with = "crate::number")]
    pub seats_qty: f64,
}

impl Resource for Car {
    const COLLECTION: &'static str = "cars";
}

/// Field rules for cars: vehicle fields, 2..=4 doors, 2..=7 seats.
#[derive(Clone, Copy, Debug, Default)]
pub struct CarSchema;

impl Schema for CarSchema {
    type Output = Car;

    fn validate(&self, input: &Value) -> Result<Car, ValidationError> {
        let mut r = FieldReader::new(input);
        let vehicle = Vehicle::read(&mut r);
        let doors_qty = r.integer("doorsQty", "Doors quantity", 2, Some(4));
        let seats_qty = r.integer("seatsQty", "Seats quantity", 2, Some(7));

        r.finish(|| {
            Some(Car {
                vehicle: vehicle?,
                doors_qty: doors_qty? as f64,
                seats_qty: seats_qty? as f64,
            })
        })
    }
}
