//! Service layer providing CRUD operations on the vehicle collections.
//! - Separates validation and orchestration from data access.
//! - Reuses entity definitions and field rules from the `models` crate.
//! - Storage backends plug in behind [`storage::DocumentStore`].

pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod test_support;
