use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{delete, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::documents::{DocumentEntity, InsertDocumentEntity},
        repositories::documents::DocumentRepository,
        value_objects::documents::RegisterDocumentModel,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{documents, vehicles},
    },
};

pub struct DocumentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DocumentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DocumentRepository for DocumentPostgres {
    async fn register_for_vehicle(
        &self,
        vehicle_id: Uuid,
        requester_id: Uuid,
        document: RegisterDocumentModel,
    ) -> Result<Option<DocumentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        let result = conn.transaction::<Option<DocumentEntity>, diesel::result::Error, _>(|conn| {
            // FOR SHARE blocks a concurrent transfer until this insert commits.
            let owner_id = vehicles::table
                .filter(vehicles::id.eq(vehicle_id))
                .filter(vehicles::owner_id.eq(requester_id))
                .select(vehicles::owner_id)
                .for_share()
                .first::<Uuid>(conn)
                .optional()?;

            let Some(owner_id) = owner_id else {
                return Ok(None);
            };

            let insert_entity = InsertDocumentEntity {
                vehicle_id,
                owner_id,
                name: document.name,
                type_: document.type_,
                description: document.description,
                storage_handle: document.storage_handle,
                file_name: document.file_name,
                file_size: document.file_size,
                mime_type: document.mime_type,
                created_at: now,
                updated_at: now,
            };

            let created = insert_into(documents::table)
                .values(&insert_entity)
                .returning(DocumentEntity::as_select())
                .get_result::<DocumentEntity>(conn)?;

            Ok(Some(created))
        })?;

        Ok(result)
    }

    async fn list_for_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Vec<DocumentEntity>>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let owned = vehicles::table
            .filter(vehicles::id.eq(vehicle_id))
            .filter(vehicles::owner_id.eq(owner_id))
            .select(vehicles::id)
            .first::<Uuid>(&mut conn)
            .optional()?;
        if owned.is_none() {
            return Ok(None);
        }

        let results = documents::table
            .filter(documents::vehicle_id.eq(vehicle_id))
            .order((documents::created_at.desc(), documents::id.desc()))
            .select(DocumentEntity::as_select())
            .load::<DocumentEntity>(&mut conn)?;

        Ok(Some(results))
    }

    async fn delete_owned(&self, document_id: Uuid, owner_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(
            documents::table
                .filter(documents::id.eq(document_id))
                .filter(documents::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
