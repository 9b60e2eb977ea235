use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use carnet::{
    domain::repositories::billing_events::BillingEventRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::billing_events::BillingEventPostgres,
    },
    payments::webhook_signature::WebhookVerifier,
};
use serde_json::json;

use crate::usecases::billing_webhook::BillingWebhookUseCase;

pub const WEBHOOK_BODY_LIMIT: usize = 64 * 1024;
pub const SIGNATURE_HEADER: &str = "stripe-signature";

pub fn routes(db_pool: Arc<PgPoolSquad>, webhook_secret: String) -> Router {
    let event_repository = BillingEventPostgres::new(Arc::clone(&db_pool));
    let webhook_usecase = BillingWebhookUseCase::new(
        Arc::new(event_repository),
        WebhookVerifier::new(webhook_secret),
    );

    Router::new()
        .route("/webhook", post(webhook))
        .layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT))
        .with_state(Arc::new(webhook_usecase))
}

/// Unauthenticated: the provider signature is the credential.
pub async fn webhook<E>(
    State(webhook_usecase): State<Arc<BillingWebhookUseCase<E>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    E: BillingEventRepository + Send + Sync + 'static,
{
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match webhook_usecase.handle(&body, signature).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(e) => e.into_response(),
    }
}
