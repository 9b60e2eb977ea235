use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::documents;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = documents)]
pub struct DocumentEntity {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub type_: String,
    pub description: Option<String>,
    pub storage_handle: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `owner_id` is not supplied by callers; it is copied from the locked
/// vehicle row at insert time.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub struct InsertDocumentEntity {
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub type_: String,
    pub description: Option<String>,
    pub storage_handle: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
