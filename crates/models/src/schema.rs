//! Structural validation of untyped JSON input into typed entities.
//!
//! A [`Schema`] walks every declared field before answering, so a caller gets
//! the complete list of complaints in one round trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One complaint about one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field complaints produced by a [`Schema`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError(Vec<FieldError>);

impl ValidationError {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn issues(&self) -> &[FieldError] { &self.0 }

    /// Fields named by the complaints, in order (a field may repeat).
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    pub fn has_message(&self, message: &str) -> bool {
        self.0.iter().any(|e| e.message == message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| if e.field.is_empty() { e.message.clone() } else { format!("{}: {}", e.field, e.message) })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Per-resource-kind validator: untyped input in, typed entity or complaints out.
pub trait Schema: Send + Sync {
    type Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, ValidationError>;
}

/// Reads fields out of one JSON object, recording a complaint for every
/// missing, mistyped or out-of-range value instead of stopping at the first.
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: ValidationError,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a Value) -> Self {
        let mut errors = ValidationError::new();
        let object = input.as_object();
        if object.is_none() {
            errors.push("", format!("Expected object, received {}", type_name(input)));
        }
        Self { object, errors }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.and_then(|o| o.get(field)).filter(|v| !v.is_null())
    }

    /// Required non-empty string.
    pub fn string(&mut self, field: &str, label: &str) -> Option<String> {
        self.object?;
        match self.get(field) {
            None => {
                self.errors.push(field, format!("{label} is required"));
                None
            }
            Some(Value::String(s)) => {
                if s.is_empty() {
                    self.errors.push(field, format!("{label} must not be empty"));
                    return None;
                }
                Some(s.clone())
            }
            Some(_) => {
                self.errors.push(field, format!("{label} must be a string"));
                None
            }
        }
    }

    /// Required integer within `[min, max]` (inclusive); `max = None` leaves it unbounded.
    pub fn integer(&mut self, field: &str, label: &str, min: i64, max: Option<i64>) -> Option<i64> {
        self.object?;
        let value = match self.get(field) {
            None => {
                self.errors.push(field, format!("{label} is required"));
                return None;
            }
            Some(Value::Number(n)) => n,
            Some(_) => {
                self.errors.push(field, format!("{label} must be a number"));
                return None;
            }
        };

        let int = match value.as_i64() {
            Some(i) => i,
            None => match value.as_f64() {
                Some(f) if f.fract() != 0.0 => {
                    self.errors.push(field, format!("{label} must be an integer"));
                    return None;
                }
                // whole floats (`2003.0`) are fine as long as they fit
                Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => f as i64,
                _ => {
                    self.errors.push(field, format!("{label} is too large"));
                    return None;
                }
            },
        };

        if int < min {
            self.errors.push(field, format!("{label} must be {min} or higher"));
            return None;
        }
        if let Some(max) = max {
            if int > max {
                self.errors.push(field, format!("{label} must be {max} or lower"));
                return None;
            }
        }
        Some(int)
    }

    /// Required number (fractions allowed) within `[min, max]` (inclusive).
    pub fn number(&mut self, field: &str, label: &str, min: f64, max: Option<f64>) -> Option<f64> {
        self.object?;
        let value = match self.get(field) {
            None => {
                self.errors.push(field, format!("{label} is required"));
                return None;
            }
            Some(Value::Number(n)) => n.as_f64()?,
            Some(_) => {
                self.errors.push(field, format!("{label} must be a number"));
                return None;
            }
        };

        if value < min {
            self.errors.push(field, format!("{label} must be {min} or higher"));
            return None;
        }
        if let Some(max) = max {
            if value > max {
                self.errors.push(field, format!("{label} must be {max} or lower"));
                return None;
            }
        }
        Some(value)
    }

    /// Optional boolean; absent and `null` both read as `None`.
    pub fn optional_bool(&mut self, field: &str, label: &str) -> Option<bool> {
        match self.get(field) {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.errors.push(field, format!("{label} must be a boolean"));
                None
            }
        }
    }

    /// Required string drawn from a closed, case-sensitive set.
    pub fn one_of(&mut self, field: &str, label: &str, allowed: &[&str]) -> Option<String> {
        self.object?;
        match self.get(field) {
            None => {
                self.errors.push(field, format!("{label} is required"));
                None
            }
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => Some(s.clone()),
            Some(Value::String(_)) => {
                self.errors.push(field, format!("{label} must be one of {}", allowed.join(", ")));
                None
            }
            Some(_) => {
                self.errors.push(field, format!("{label} must be a string"));
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool { self.errors.is_empty() }

    /// Return all complaints if any were recorded, otherwise assemble the entity.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or_else(|| {
            let mut errors = ValidationError::new();
            errors.push("", "Invalid input");
            errors
        })
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
