use std::sync::Arc;

use carnet::domain::{
    repositories::{
        accounts::AccountRepository, ownership_transfer::OwnershipTransferRepository,
    },
    value_objects::ownership_transfer::{TransferCounts, TransferOutcome, TransferVehicleModel},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};

pub struct OwnershipTransferUseCase<A, T>
where
    A: AccountRepository + Send + Sync + 'static,
    T: OwnershipTransferRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    transfer_repo: Arc<T>,
}

impl<A, T> OwnershipTransferUseCase<A, T>
where
    A: AccountRepository + Send + Sync + 'static,
    T: OwnershipTransferRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, transfer_repo: Arc<T>) -> Self {
        Self {
            account_repo,
            transfer_repo,
        }
    }

    /// Preconditions are checked in order: the vehicle belongs to the
    /// requester, the target email resolves, the target is someone else.
    /// Ownership is re-checked under a row lock inside the transaction.
    pub async fn transfer(
        &self,
        vehicle_id: Uuid,
        requester_id: Uuid,
        model: TransferVehicleModel,
    ) -> UseCaseResult<TransferCounts> {
        let target_email = model.new_owner_email.trim();
        if target_email.is_empty() {
            return Err(UseCaseError::Validation(
                "new_owner_email is required".to_string(),
            ));
        }

        info!(%vehicle_id, %requester_id, "ownership_transfer: transfer requested");

        self.transfer_repo
            .find_owned_vehicle(vehicle_id, requester_id)
            .await
            .map_err(|err| {
                error!(%vehicle_id, db_error = ?err, "ownership_transfer: failed to load vehicle");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("vehicle not found".to_string()))?;

        let target = self
            .account_repo
            .find_by_email(target_email)
            .await
            .map_err(|err| {
                error!(%vehicle_id, db_error = ?err, "ownership_transfer: failed to resolve target account");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("no account for new_owner_email".to_string()))?;

        if target.id == requester_id {
            return Err(UseCaseError::Validation(
                "cannot transfer a vehicle to its current owner".to_string(),
            ));
        }

        let outcome = self
            .transfer_repo
            .transfer_vehicle(vehicle_id, requester_id, target.id)
            .await
            .map_err(|err| {
                error!(
                    %vehicle_id,
                    from_owner = %requester_id,
                    to_owner = %target.id,
                    db_error = ?err,
                    "ownership_transfer: transaction failed and was rolled back"
                );
                UseCaseError::StoreFailure
            })?;

        match outcome {
            TransferOutcome::Transferred(counts) => {
                info!(
                    %vehicle_id,
                    from_owner = %requester_id,
                    to_owner = %target.id,
                    documents_transferred = counts.documents_transferred,
                    appointments_transferred = counts.appointments_transferred,
                    "ownership_transfer: vehicle transferred"
                );
                Ok(counts)
            }
            TransferOutcome::VehicleNotOwned => {
                warn!(%vehicle_id, %requester_id, "ownership_transfer: vehicle changed hands before lock");
                Err(UseCaseError::NotFound("vehicle not found".to_string()))
            }
        }
    }
}
