use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use carnet::{
    domain::{
        repositories::documents::DocumentRepository,
        value_objects::documents::RegisterDocumentModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::documents::DocumentPostgres,
    },
};
use uuid::Uuid;

use crate::{auth::AuthUser, usecases::documents::DocumentUseCase};

fn usecase(db_pool: Arc<PgPoolSquad>) -> Arc<DocumentUseCase<DocumentPostgres>> {
    let document_repository = DocumentPostgres::new(db_pool);
    Arc::new(DocumentUseCase::new(Arc::new(document_repository)))
}

/// Mounted under the vehicles prefix.
pub fn vehicle_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/:vehicle_id/documents", post(register).get(list))
        .with_state(usecase(db_pool))
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .route("/:document_id", delete(remove))
        .with_state(usecase(db_pool))
}

pub async fn register<D>(
    State(document_usecase): State<Arc<DocumentUseCase<D>>>,
    auth: AuthUser,
    Path(vehicle_id): Path<Uuid>,
    Json(register_document_model): Json<RegisterDocumentModel>,
) -> impl IntoResponse
where
    D: DocumentRepository + Send + Sync + 'static,
{
    match document_usecase
        .register(vehicle_id, auth.account_id, register_document_model)
        .await
    {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list<D>(
    State(document_usecase): State<Arc<DocumentUseCase<D>>>,
    auth: AuthUser,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse
where
    D: DocumentRepository + Send + Sync + 'static,
{
    match document_usecase
        .list_for_vehicle(vehicle_id, auth.account_id)
        .await
    {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn remove<D>(
    State(document_usecase): State<Arc<DocumentUseCase<D>>>,
    auth: AuthUser,
    Path(document_id): Path<Uuid>,
) -> impl IntoResponse
where
    D: DocumentRepository + Send + Sync + 'static,
{
    match document_usecase.delete(document_id, auth.account_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
