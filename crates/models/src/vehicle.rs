//! Fields shared by every vehicle kind.

use serde::{Deserialize, Serialize};

use crate::schema::FieldReader;

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2022;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub model: String,
    #[serde(with = "crate::number")]
    pub year: f64,
    pub color: String,
    /// Whether the vehicle is currently for sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(with = "crate::number")]
    pub buy_value: f64,
}

impl Vehicle {
    /// Read the shared fields, recording complaints on `r`.
    pub fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let model = r.string("model", "Model");
        let year = r.integer("year", "Year", MIN_YEAR, Some(MAX_YEAR));
        let color = r.string("color", "Color");
        let status = r.optional_bool("status", "Status");
        let buy_value = r.number("buyValue", "Buy value", 0.0, None);

        Some(Self {
            model: model?,
            year: year? as f64,
            color: color?,
            status,
            buy_value: buy_value?,
        })
    }
}
