use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::vehicles::VehicleEntity;
use crate::domain::value_objects::ownership_transfer::TransferOutcome;

#[async_trait]
#[automock]
pub trait OwnershipTransferRepository {
    async fn find_owned_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<VehicleEntity>>;

    /// Moves the vehicle and every document and appointment attached to it
    /// from `from_owner` to `to_owner` in a single transaction.
    async fn transfer_vehicle(
        &self,
        vehicle_id: Uuid,
        from_owner: Uuid,
        to_owner: Uuid,
    ) -> Result<TransferOutcome>;
}
