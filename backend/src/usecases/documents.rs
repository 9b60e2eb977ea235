use std::sync::Arc;

use carnet::domain::{
    repositories::documents::DocumentRepository,
    value_objects::documents::{DocumentDto, DocumentListDto, RegisterDocumentModel},
};
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult, require_text};

pub struct DocumentUseCase<D>
where
    D: DocumentRepository + Send + Sync + 'static,
{
    document_repo: Arc<D>,
}

impl<D> DocumentUseCase<D>
where
    D: DocumentRepository + Send + Sync + 'static,
{
    pub fn new(document_repo: Arc<D>) -> Self {
        Self { document_repo }
    }

    /// The file itself is already stored; this records its metadata against
    /// a vehicle the requester owns.
    pub async fn register(
        &self,
        vehicle_id: Uuid,
        requester_id: Uuid,
        model: RegisterDocumentModel,
    ) -> UseCaseResult<DocumentDto> {
        require_text("name", &model.name)?;
        require_text("type", &model.type_)?;
        require_text("storage_handle", &model.storage_handle)?;
        require_text("file_name", &model.file_name)?;
        require_text("mime_type", &model.mime_type)?;
        if model.file_size <= 0 {
            return Err(UseCaseError::Validation(
                "file_size must be positive".to_string(),
            ));
        }

        let document = self
            .document_repo
            .register_for_vehicle(vehicle_id, requester_id, model)
            .await
            .map_err(|err| {
                error!(%vehicle_id, %requester_id, db_error = ?err, "documents: failed to register document");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("vehicle not found".to_string()))?;

        info!(document_id = %document.id, %vehicle_id, "documents: document registered");
        Ok(document.into())
    }

    pub async fn list_for_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> UseCaseResult<DocumentListDto> {
        let documents = self
            .document_repo
            .list_for_vehicle(vehicle_id, owner_id)
            .await
            .map_err(|err| {
                error!(%vehicle_id, %owner_id, db_error = ?err, "documents: failed to list documents");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("vehicle not found".to_string()))?;

        Ok(documents.into())
    }

    pub async fn delete(&self, document_id: Uuid, owner_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .document_repo
            .delete_owned(document_id, owner_id)
            .await
            .map_err(|err| {
                error!(%document_id, %owner_id, db_error = ?err, "documents: failed to delete document");
                UseCaseError::StoreFailure
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound("document not found".to_string()));
        }

        info!(%document_id, %owner_id, "documents: document deleted");
        Ok(())
    }
}
