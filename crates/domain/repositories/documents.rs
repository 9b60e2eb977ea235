use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::documents::DocumentEntity;
use crate::domain::value_objects::documents::RegisterDocumentModel;

#[async_trait]
#[automock]
pub trait DocumentRepository {
    /// Registers a document against a vehicle owned by `requester_id`. The
    /// stored owner is read from the locked vehicle row. `None` when the
    /// vehicle is missing or owned by someone else.
    async fn register_for_vehicle(
        &self,
        vehicle_id: Uuid,
        requester_id: Uuid,
        document: RegisterDocumentModel,
    ) -> Result<Option<DocumentEntity>>;

    /// Newest first. `None` when the vehicle does not belong to `owner_id`.
    async fn list_for_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Vec<DocumentEntity>>>;

    async fn delete_owned(&self, document_id: Uuid, owner_id: Uuid) -> Result<bool>;
}
