//! Entities as the document store hands them back: the fields plus `_id`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::object_id::ObjectId;

/// A resource kind that lives in its own collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub doc: T,
}

impl<T> Stored<T> {
    pub fn new(id: ObjectId, doc: T) -> Self { Self { id, doc } }
}
