use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};
use carnet::{
    domain::{
        repositories::appointments::AppointmentRepository,
        value_objects::appointments::{AppointmentPatch, CreateAppointmentModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::appointments::AppointmentPostgres,
    },
};
use uuid::Uuid;

use crate::{auth::AuthUser, usecases::appointments::AppointmentUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let appointment_repository = AppointmentPostgres::new(Arc::clone(&db_pool));
    let appointment_usecase = AppointmentUseCase::new(Arc::new(appointment_repository));

    Router::new()
        .route("/", post(create))
        .route("/:appointment_id", patch(update).delete(delete))
        .with_state(Arc::new(appointment_usecase))
}

pub async fn create<R>(
    State(appointment_usecase): State<Arc<AppointmentUseCase<R>>>,
    auth: AuthUser,
    Json(create_appointment_model): Json<CreateAppointmentModel>,
) -> impl IntoResponse
where
    R: AppointmentRepository + Send + Sync + 'static,
{
    match appointment_usecase
        .create(auth.account_id, create_appointment_model)
        .await
    {
        Ok(appointment) => (StatusCode::CREATED, Json(appointment)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update<R>(
    State(appointment_usecase): State<Arc<AppointmentUseCase<R>>>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    Json(appointment_patch): Json<AppointmentPatch>,
) -> impl IntoResponse
where
    R: AppointmentRepository + Send + Sync + 'static,
{
    match appointment_usecase
        .update(appointment_id, auth.account_id, appointment_patch)
        .await
    {
        Ok(appointment) => (StatusCode::OK, Json(appointment)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete<R>(
    State(appointment_usecase): State<Arc<AppointmentUseCase<R>>>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: AppointmentRepository + Send + Sync + 'static,
{
    match appointment_usecase
        .delete(appointment_id, auth.account_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
