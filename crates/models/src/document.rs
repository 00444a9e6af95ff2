//! `document` table: one row per stored entity, partitioned by collection.
//!
//! The entity body is opaque JSON here; typing happens in the service layer.

use sea_orm::{entity::prelude::*, QueryOrder, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, object_id::ObjectId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub collection: String,
    pub body: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All documents of a collection in insertion order.
pub async fn list(db: &DatabaseConnection, collection: &str) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::Collection.eq(collection))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, collection: &str, id: &ObjectId) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id.to_hex())
        .filter(Column::Collection.eq(collection))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a new document under a freshly generated id.
pub async fn insert(db: &DatabaseConnection, collection: &str, body: Json) -> Result<Model, errors::ModelError> {
    if !body.is_object() {
        return Err(errors::ModelError::Validation("document body must be a JSON object".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(ObjectId::new().to_hex()),
        collection: Set(collection.to_string()),
        body: Set(body),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite the body of an existing document.
pub async fn replace_body(db: &DatabaseConnection, existing: Model, body: Json) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    am.body = Set(body);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete a document; returns its last stored state when it existed.
pub async fn delete(db: &DatabaseConnection, collection: &str, id: &ObjectId) -> Result<Option<Model>, errors::ModelError> {
    let Some(existing) = find(db, collection, id).await? else { return Ok(None) };
    let res = Entity::delete_many()
        .filter(Column::Id.eq(existing.id.clone()))
        .filter(Column::Collection.eq(collection))
        .exec(db)
        .await?;
    // a concurrent delete may have won the race
    Ok((res.rows_affected > 0).then_some(existing))
}
