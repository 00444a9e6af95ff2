//! Serde helpers for numeric document fields.
//!
//! Numbers are held as `f64` so any JSON number an update supplies fits.
//! Whole values are written back as integers (`2003`, not `2003.0`).

use serde::{Deserialize, Deserializer, Serializer};

// beyond 2^53 not every whole f64 maps to a distinct integer
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer)
}
