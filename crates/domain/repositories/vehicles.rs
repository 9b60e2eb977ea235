use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::vehicles::{InsertVehicleEntity, UpdateVehicleEntity, VehicleEntity};

#[async_trait]
#[automock]
pub trait VehicleRepository {
    async fn create(&self, insert_vehicle_entity: InsertVehicleEntity) -> Result<VehicleEntity>;

    /// Oldest first.
    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<VehicleEntity>>;

    /// `None` when no vehicle with that id belongs to `owner_id`.
    async fn update_owned(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        changeset: UpdateVehicleEntity,
    ) -> Result<Option<VehicleEntity>>;

    async fn delete_owned(&self, vehicle_id: Uuid, owner_id: Uuid) -> Result<bool>;
}
