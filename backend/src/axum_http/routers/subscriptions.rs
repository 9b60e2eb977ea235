use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use carnet::{
    domain::{
        repositories::{accounts::AccountRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::CreateSubscriptionModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{accounts::AccountPostgres, subscriptions::SubscriptionPostgres},
    },
    payments::stripe_client::StripeClient,
};

use crate::{
    auth::AuthUser,
    usecases::subscriptions::{BillingProvider, SubscriptionUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, stripe_client: Arc<StripeClient>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(account_repository),
        Arc::new(subscription_repository),
        stripe_client,
    );

    Router::new()
        .route("/", post(create))
        .route("/status", get(status))
        .route("/cancel", post(cancel))
        .route("/client-secret", get(client_secret))
        .with_state(Arc::new(subscription_usecase))
}

pub async fn create<A, S, B>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<A, S, B>>>,
    auth: AuthUser,
    Json(create_subscription_model): Json<CreateSubscriptionModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    match subscription_usecase
        .create(auth.account_id, create_subscription_model)
        .await
    {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn status<A, S, B>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<A, S, B>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    match subscription_usecase.status(auth.account_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn cancel<A, S, B>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<A, S, B>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    match subscription_usecase.cancel(auth.account_id).await {
        Ok(canceled) => (StatusCode::OK, Json(canceled)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn client_secret<A, S, B>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<A, S, B>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    match subscription_usecase.client_secret(auth.account_id).await {
        Ok(secret) => (StatusCode::OK, Json(secret)).into_response(),
        Err(e) => e.into_response(),
    }
}
