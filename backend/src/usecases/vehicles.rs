use std::sync::Arc;

use carnet::domain::{
    repositories::vehicles::VehicleRepository,
    value_objects::vehicles::{CreateVehicleModel, VehicleDto, VehicleListDto, VehiclePatch},
};
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult, require_text};

pub struct VehicleUseCase<V>
where
    V: VehicleRepository + Send + Sync + 'static,
{
    vehicle_repo: Arc<V>,
}

impl<V> VehicleUseCase<V>
where
    V: VehicleRepository + Send + Sync + 'static,
{
    pub fn new(vehicle_repo: Arc<V>) -> Self {
        Self { vehicle_repo }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        model: CreateVehicleModel,
    ) -> UseCaseResult<VehicleDto> {
        require_text("plate", &model.plate)?;
        require_text("brand", &model.brand)?;
        require_text("model", &model.model)?;
        Self::validate_mileage(model.mileage)?;

        let created = self
            .vehicle_repo
            .create(model.into_entity(owner_id, Utc::now()))
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "vehicles: failed to create vehicle");
                UseCaseError::StoreFailure
            })?;

        info!(vehicle_id = %created.id, %owner_id, "vehicles: vehicle created");
        Ok(created.into())
    }

    pub async fn list(&self, owner_id: Uuid) -> UseCaseResult<VehicleListDto> {
        let vehicles = self.vehicle_repo.list_owned(owner_id).await.map_err(|err| {
            error!(%owner_id, db_error = ?err, "vehicles: failed to list vehicles");
            UseCaseError::StoreFailure
        })?;

        Ok(vehicles.into())
    }

    pub async fn update(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        patch: VehiclePatch,
    ) -> UseCaseResult<VehicleDto> {
        Self::validate(&patch)?;

        let updated = self
            .vehicle_repo
            .update_owned(vehicle_id, owner_id, patch.into_changeset(Utc::now()))
            .await
            .map_err(|err| {
                error!(%vehicle_id, %owner_id, db_error = ?err, "vehicles: failed to update vehicle");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("vehicle not found".to_string()))?;

        info!(%vehicle_id, %owner_id, "vehicles: vehicle updated");
        Ok(updated.into())
    }

    /// Documents go with the vehicle; appointments keep their row and lose
    /// the vehicle reference.
    pub async fn delete(&self, vehicle_id: Uuid, owner_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .vehicle_repo
            .delete_owned(vehicle_id, owner_id)
            .await
            .map_err(|err| {
                error!(%vehicle_id, %owner_id, db_error = ?err, "vehicles: failed to delete vehicle");
                UseCaseError::StoreFailure
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound("vehicle not found".to_string()));
        }

        info!(%vehicle_id, %owner_id, "vehicles: vehicle deleted");
        Ok(())
    }

    fn validate(patch: &VehiclePatch) -> UseCaseResult<()> {
        if patch.is_empty() {
            return Err(UseCaseError::Validation("no fields to update".to_string()));
        }

        for (field, value) in [
            ("plate", &patch.plate),
            ("brand", &patch.brand),
            ("model", &patch.model),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }

        Self::validate_mileage(patch.mileage.flatten())
    }

    fn validate_mileage(mileage: Option<i32>) -> UseCaseResult<()> {
        match mileage {
            Some(mileage) if mileage < 0 => Err(UseCaseError::Validation(
                "mileage must not be negative".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
