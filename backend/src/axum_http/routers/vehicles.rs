use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use carnet::{
    domain::{
        repositories::{
            accounts::AccountRepository, ownership_transfer::OwnershipTransferRepository,
            vehicles::VehicleRepository,
        },
        value_objects::{
            ownership_transfer::TransferVehicleModel,
            vehicles::{CreateVehicleModel, VehiclePatch},
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            accounts::AccountPostgres, ownership_transfer::OwnershipTransferPostgres,
            vehicles::VehiclePostgres,
        },
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    usecases::{ownership_transfer::OwnershipTransferUseCase, vehicles::VehicleUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let transfer_repository = OwnershipTransferPostgres::new(Arc::clone(&db_pool));
    let transfer_usecase =
        OwnershipTransferUseCase::new(Arc::new(account_repository), Arc::new(transfer_repository));

    let vehicle_repository = VehiclePostgres::new(Arc::clone(&db_pool));
    let vehicle_usecase = VehicleUseCase::new(Arc::new(vehicle_repository));

    Router::new()
        .route("/:vehicle_id/transfer", post(transfer))
        .with_state(Arc::new(transfer_usecase))
        .merge(
            Router::new()
                .route("/", post(create).get(list))
                .route("/:vehicle_id", patch(update).delete(delete))
                .with_state(Arc::new(vehicle_usecase)),
        )
}

pub async fn transfer<A, T>(
    State(transfer_usecase): State<Arc<OwnershipTransferUseCase<A, T>>>,
    auth: AuthUser,
    Path(vehicle_id): Path<Uuid>,
    Json(transfer_model): Json<TransferVehicleModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    T: OwnershipTransferRepository + Send + Sync + 'static,
{
    match transfer_usecase
        .transfer(vehicle_id, auth.account_id, transfer_model)
        .await
    {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create<V>(
    State(vehicle_usecase): State<Arc<VehicleUseCase<V>>>,
    auth: AuthUser,
    Json(create_vehicle_model): Json<CreateVehicleModel>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicle_usecase
        .create(auth.account_id, create_vehicle_model)
        .await
    {
        Ok(vehicle) => (StatusCode::CREATED, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list<V>(
    State(vehicle_usecase): State<Arc<VehicleUseCase<V>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicle_usecase.list(auth.account_id).await {
        Ok(vehicles) => (StatusCode::OK, Json(vehicles)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update<V>(
    State(vehicle_usecase): State<Arc<VehicleUseCase<V>>>,
    auth: AuthUser,
    Path(vehicle_id): Path<Uuid>,
    Json(vehicle_patch): Json<VehiclePatch>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicle_usecase
        .update(vehicle_id, auth.account_id, vehicle_patch)
        .await
    {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete<V>(
    State(vehicle_usecase): State<Arc<VehicleUseCase<V>>>,
    auth: AuthUser,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicle_usecase.delete(vehicle_id, auth.account_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
