use models::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed the resource's field rules; an expected outcome, not a fault.
    #[error("validation error: {0}")]
    Validation(ValidationError),
    #[error("database error: {0}")]
    Db(String),
    #[error("malformed document: {0}")]
    Decode(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::Decode(e.to_string()) }
}
