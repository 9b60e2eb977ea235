use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::documents::DocumentEntity;

/// Metadata for a file the storage collaborator already holds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegisterDocumentModel {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub description: Option<String>,
    pub storage_handle: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentDto {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentEntity> for DocumentDto {
    fn from(entity: DocumentEntity) -> Self {
        Self {
            id: entity.id,
            vehicle_id: entity.vehicle_id,
            name: entity.name,
            type_: entity.type_,
            description: entity.description,
            file_name: entity.file_name,
            file_size: entity.file_size,
            mime_type: entity.mime_type,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentListDto {
    pub documents: Vec<DocumentDto>,
}

impl From<Vec<DocumentEntity>> for DocumentListDto {
    fn from(entities: Vec<DocumentEntity>) -> Self {
        Self {
            documents: entities.into_iter().map(DocumentDto::from).collect(),
        }
    }
}
