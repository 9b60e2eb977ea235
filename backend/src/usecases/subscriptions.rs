use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use carnet::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::{accounts::AccountRepository, subscriptions::SubscriptionRepository},
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            subscriptions::{
                CanceledSubscriptionDto, ClientSecretDto, CreateSubscriptionModel,
                CreatedSubscriptionDto, InsertSubscriptionOutcome, ProviderSubscription,
                SubscriptionSnapshot, SubscriptionStatusDto,
            },
        },
    },
    payments::stripe_client::StripeClient,
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult};

/// Stripe's upper bound for `trial_period_days`.
pub const MAX_TRIAL_PERIOD_DAYS: i64 = 730;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingProvider: Send + Sync {
    async fn create_customer(&self, email: &str, name: &str, account_id: Uuid)
        -> AnyResult<String>;

    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
        trial_period_days: i64,
        account_id: Uuid,
    ) -> AnyResult<ProviderSubscription>;

    async fn cancel_at_period_end(
        &self,
        provider_subscription_id: &str,
    ) -> AnyResult<SubscriptionSnapshot>;

    async fn retrieve_subscription(
        &self,
        provider_subscription_id: &str,
    ) -> AnyResult<ProviderSubscription>;
}

#[async_trait]
impl BillingProvider for StripeClient {
    async fn create_customer(
        &self,
        email: &str,
        name: &str,
        account_id: Uuid,
    ) -> AnyResult<String> {
        self.create_customer(email, name, account_id).await
    }

    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
        trial_period_days: i64,
        account_id: Uuid,
    ) -> AnyResult<ProviderSubscription> {
        self.create_subscription(customer_id, price_id, trial_period_days, account_id)
            .await?
            .into_provider_subscription()
    }

    async fn cancel_at_period_end(
        &self,
        provider_subscription_id: &str,
    ) -> AnyResult<SubscriptionSnapshot> {
        self.cancel_subscription(provider_subscription_id)
            .await?
            .snapshot()
    }

    async fn retrieve_subscription(
        &self,
        provider_subscription_id: &str,
    ) -> AnyResult<ProviderSubscription> {
        self.retrieve_subscription(provider_subscription_id)
            .await?
            .into_provider_subscription()
    }
}

pub struct SubscriptionUseCase<A, S, B>
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    subscription_repo: Arc<S>,
    billing_provider: Arc<B>,
}

impl<A, S, B> SubscriptionUseCase<A, S, B>
where
    A: AccountRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, subscription_repo: Arc<S>, billing_provider: Arc<B>) -> Self {
        Self {
            account_repo,
            subscription_repo,
            billing_provider,
        }
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        model: CreateSubscriptionModel,
    ) -> UseCaseResult<CreatedSubscriptionDto> {
        let price_id = model.price_id.trim().to_string();
        if price_id.is_empty() {
            return Err(UseCaseError::Validation("price_id is required".to_string()));
        }
        if !(0..=MAX_TRIAL_PERIOD_DAYS).contains(&model.trial_period_days) {
            return Err(UseCaseError::Validation(format!(
                "trial_period_days must be between 0 and {MAX_TRIAL_PERIOD_DAYS}"
            )));
        }

        if self.find_subscription(account_id).await?.is_some() {
            return Err(UseCaseError::Conflict(
                "account already has a subscription".to_string(),
            ));
        }

        let account = self
            .account_repo
            .find_by_id(account_id)
            .await
            .map_err(|err| {
                error!(%account_id, db_error = ?err, "subscriptions: failed to load account");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("account not found".to_string()))?;

        let customer_id = self
            .billing_provider
            .create_customer(&account.email, &account.full_name, account_id)
            .await
            .map_err(|err| {
                error!(%account_id, provider_error = ?err, "subscriptions: failed to create customer");
                UseCaseError::UpstreamFailure
            })?;

        let provider_subscription = self
            .billing_provider
            .create_subscription(&customer_id, &price_id, model.trial_period_days, account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %customer_id,
                    provider_error = ?err,
                    operator_alert = true,
                    "subscriptions: customer created but subscription creation failed"
                );
                UseCaseError::UpstreamFailure
            })?;

        let trial_period = model.trial_period_days > 0;
        let client_secret = self.secret_for_new_subscription(account_id, &provider_subscription, trial_period);
        let snapshot = &provider_subscription.snapshot;
        let provider_subscription_id = snapshot.provider_subscription_id.clone();
        let status = snapshot.status;

        let now = Utc::now();
        let row = InsertSubscriptionEntity {
            account_id,
            provider_customer_id: customer_id.clone(),
            provider_subscription_id: provider_subscription_id.clone(),
            provider_price_id: price_id,
            status: status.to_string(),
            current_period_start: snapshot.current_period_start.unwrap_or(now),
            current_period_end: snapshot
                .current_period_end
                .or(snapshot.trial_end)
                .unwrap_or(now),
            trial_start: snapshot.trial_start,
            trial_end: snapshot.trial_end,
            cancel_at_period_end: snapshot.cancel_at_period_end.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        match self.subscription_repo.insert(row).await {
            Ok(InsertSubscriptionOutcome::Inserted) => {}
            Ok(InsertSubscriptionOutcome::AlreadyExists) => {
                error!(
                    %account_id,
                    %customer_id,
                    %provider_subscription_id,
                    operator_alert = true,
                    "subscriptions: concurrent create left a provider subscription without a local row"
                );
                return Err(UseCaseError::Conflict(
                    "account already has a subscription".to_string(),
                ));
            }
            Err(err) => {
                error!(
                    %account_id,
                    %customer_id,
                    %provider_subscription_id,
                    db_error = ?err,
                    operator_alert = true,
                    "subscriptions: provider subscription created but local insert failed"
                );
                return Err(UseCaseError::StoreFailure);
            }
        }

        info!(
            %account_id,
            %provider_subscription_id,
            %status,
            trial_period,
            "subscriptions: subscription created"
        );

        Ok(CreatedSubscriptionDto {
            subscription_id: provider_subscription_id,
            client_secret: client_secret.as_ref().map(|secret| secret.client_secret.clone()),
            status,
            setup_required: client_secret.as_ref().is_some_and(|secret| secret.setup_required),
            trial_period,
        })
    }

    pub async fn status(&self, account_id: Uuid) -> UseCaseResult<SubscriptionStatusDto> {
        let subscription = self.require_subscription(account_id).await?;
        let status = Self::stored_status(&subscription)?;

        Ok(SubscriptionStatusDto::from_entity(subscription, status))
    }

    pub async fn cancel(&self, account_id: Uuid) -> UseCaseResult<CanceledSubscriptionDto> {
        let subscription = self.require_subscription(account_id).await?;
        let provider_subscription_id = subscription.provider_subscription_id;

        let snapshot = self
            .billing_provider
            .cancel_at_period_end(&provider_subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %provider_subscription_id,
                    provider_error = ?err,
                    "subscriptions: failed to cancel at provider"
                );
                UseCaseError::UpstreamFailure
            })?;

        let result = CanceledSubscriptionDto {
            cancel_at_period_end: snapshot.cancel_at_period_end.unwrap_or(true),
            current_period_end: snapshot
                .current_period_end
                .or(Some(subscription.current_period_end)),
        };

        self.subscription_repo
            .apply_snapshot(snapshot)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %provider_subscription_id,
                    db_error = ?err,
                    operator_alert = true,
                    "subscriptions: canceled at provider but local projection failed"
                );
                UseCaseError::StoreFailure
            })?;

        info!(%account_id, %provider_subscription_id, "subscriptions: set to cancel at period end");

        Ok(result)
    }

    pub async fn client_secret(&self, account_id: Uuid) -> UseCaseResult<ClientSecretDto> {
        let subscription = self.require_subscription(account_id).await?;
        let status = Self::stored_status(&subscription)?;

        if !status.awaits_client_confirmation() {
            return Err(UseCaseError::Validation(format!(
                "subscription in status {status} has nothing to confirm"
            )));
        }

        let provider_subscription_id = subscription.provider_subscription_id;
        let provider_subscription = self
            .billing_provider
            .retrieve_subscription(&provider_subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %provider_subscription_id,
                    provider_error = ?err,
                    "subscriptions: failed to retrieve provider subscription"
                );
                UseCaseError::UpstreamFailure
            })?;

        provider_subscription
            .client_secret()
            .ok_or_else(|| UseCaseError::NotFound("no pending intent for subscription".to_string()))
    }

    fn secret_for_new_subscription(
        &self,
        account_id: Uuid,
        provider_subscription: &ProviderSubscription,
        trial_period: bool,
    ) -> Option<ClientSecretDto> {
        let secret = if trial_period {
            provider_subscription
                .setup_intent_secret
                .clone()
                .map(|client_secret| ClientSecretDto {
                    client_secret,
                    setup_required: true,
                })
        } else {
            provider_subscription
                .payment_intent_secret
                .clone()
                .map(|client_secret| ClientSecretDto {
                    client_secret,
                    setup_required: false,
                })
        };

        if secret.is_none() {
            warn!(
                %account_id,
                provider_subscription_id = %provider_subscription.snapshot.provider_subscription_id,
                trial_period,
                "subscriptions: provider returned no intent secret"
            );
        }

        secret
    }

    async fn find_subscription(&self, account_id: Uuid) -> UseCaseResult<Option<SubscriptionEntity>> {
        self.subscription_repo
            .find_by_account(account_id)
            .await
            .map_err(|err| {
                error!(%account_id, db_error = ?err, "subscriptions: failed to load subscription");
                UseCaseError::StoreFailure
            })
    }

    async fn require_subscription(&self, account_id: Uuid) -> UseCaseResult<SubscriptionEntity> {
        self.find_subscription(account_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("no subscription for account".to_string()))
    }

    fn stored_status(subscription: &SubscriptionEntity) -> UseCaseResult<SubscriptionStatus> {
        SubscriptionStatus::parse(&subscription.status).ok_or_else(|| {
            error!(
                subscription_id = %subscription.id,
                status = %subscription.status,
                "subscriptions: unknown status stored"
            );
            UseCaseError::StoreFailure
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use carnet::domain::{
        entities::accounts::AccountEntity,
        repositories::{
            accounts::MockAccountRepository, subscriptions::MockSubscriptionRepository,
        },
    };
    use chrono::{DateTime, Duration};
    use mockall::predicate::eq;

    fn account(id: Uuid) -> AccountEntity {
        AccountEntity {
            id,
            email: "driver@example.test".to_string(),
            full_name: "Driver".to_string(),
        }
    }

    fn stored_subscription(account_id: Uuid, status: SubscriptionStatus) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            account_id,
            provider_customer_id: "cus_1".to_string(),
            provider_subscription_id: "sub_1".to_string(),
            provider_price_id: "price_1".to_string(),
            status: status.to_string(),
            current_period_start: now,
            current_period_end: now + Duration::days(30),
            trial_start: None,
            trial_end: None,
            cancel_at_period_end: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn snapshot(status: SubscriptionStatus, period_end: DateTime<Utc>) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            provider_subscription_id: "sub_1".to_string(),
            status,
            current_period_start: Some(period_end - Duration::days(30)),
            current_period_end: Some(period_end),
            trial_start: None,
            trial_end: None,
            cancel_at_period_end: Some(false),
        }
    }

    fn provider_subscription(status: SubscriptionStatus) -> ProviderSubscription {
        ProviderSubscription {
            snapshot: snapshot(status, Utc::now() + Duration::days(30)),
            customer_id: "cus_1".to_string(),
            setup_intent_secret: Some("seti_secret".to_string()),
            payment_intent_secret: Some("pi_secret".to_string()),
        }
    }

    fn create_model(trial_period_days: i64) -> CreateSubscriptionModel {
        CreateSubscriptionModel {
            price_id: "price_1".to_string(),
            trial_period_days,
        }
    }

    fn no_subscription_repo() -> MockSubscriptionRepository {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_account()
            .returning(|_| Box::pin(async { Ok(None) }));
        subscription_repo
    }

    fn existing_subscription_repo(
        account_id: Uuid,
        status: SubscriptionStatus,
    ) -> MockSubscriptionRepository {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let existing = stored_subscription(account_id, status);
        subscription_repo
            .expect_find_by_account()
            .with(eq(account_id))
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
        subscription_repo
    }

    fn known_account_repo(account_id: Uuid) -> MockAccountRepository {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_id()
            .with(eq(account_id))
            .returning(move |id| Box::pin(async move { Ok(Some(account(id))) }));
        account_repo
    }

    #[tokio::test]
    async fn create_with_trial_returns_setup_intent_secret() {
        let account_id = Uuid::new_v4();

        let mut subscription_repo = no_subscription_repo();
        subscription_repo
            .expect_insert()
            .withf(move |row| {
                row.account_id == account_id
                    && row.provider_subscription_id == "sub_1"
                    && row.provider_customer_id == "cus_1"
                    && row.status == "trialing"
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(InsertSubscriptionOutcome::Inserted) }));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .with(eq("driver@example.test"), eq("Driver"), eq(account_id))
            .times(1)
            .returning(|_, _, _| Ok("cus_1".to_string()));
        billing_provider
            .expect_create_subscription()
            .with(eq("cus_1"), eq("price_1"), eq(14), eq(account_id))
            .times(1)
            .returning(|_, _, _, _| Ok(provider_subscription(SubscriptionStatus::Trialing)));

        let usecase = SubscriptionUseCase::new(
            Arc::new(known_account_repo(account_id)),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let created = usecase.create(account_id, create_model(14)).await.unwrap();

        assert_eq!(created.subscription_id, "sub_1");
        assert_eq!(created.client_secret.as_deref(), Some("seti_secret"));
        assert_eq!(created.status, SubscriptionStatus::Trialing);
        assert!(created.setup_required);
        assert!(created.trial_period);
    }

    #[tokio::test]
    async fn create_without_trial_returns_payment_intent_secret() {
        let account_id = Uuid::new_v4();

        let mut subscription_repo = no_subscription_repo();
        subscription_repo
            .expect_insert()
            .returning(|_| Box::pin(async { Ok(InsertSubscriptionOutcome::Inserted) }));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .returning(|_, _, _| Ok("cus_1".to_string()));
        billing_provider
            .expect_create_subscription()
            .returning(|_, _, _, _| Ok(provider_subscription(SubscriptionStatus::Incomplete)));

        let usecase = SubscriptionUseCase::new(
            Arc::new(known_account_repo(account_id)),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let created = usecase.create(account_id, create_model(0)).await.unwrap();

        assert_eq!(created.client_secret.as_deref(), Some("pi_secret"));
        assert!(!created.setup_required);
        assert!(!created.trial_period);
    }

    #[tokio::test]
    async fn trial_without_setup_intent_does_not_require_setup() {
        let account_id = Uuid::new_v4();

        let mut subscription_repo = no_subscription_repo();
        subscription_repo
            .expect_insert()
            .returning(|_| Box::pin(async { Ok(InsertSubscriptionOutcome::Inserted) }));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .returning(|_, _, _| Ok("cus_1".to_string()));
        billing_provider.expect_create_subscription().returning(|_, _, _, _| {
            Ok(ProviderSubscription {
                setup_intent_secret: None,
                ..provider_subscription(SubscriptionStatus::Trialing)
            })
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(known_account_repo(account_id)),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let created = usecase.create(account_id, create_model(7)).await.unwrap();

        assert_eq!(created.client_secret, None);
        assert!(!created.setup_required);
        assert!(created.trial_period);
    }

    #[tokio::test]
    async fn second_create_is_conflict_without_provider_calls() {
        let account_id = Uuid::new_v4();

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_create_customer().times(0);
        billing_provider.expect_create_subscription().times(0);

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(existing_subscription_repo(
                account_id,
                SubscriptionStatus::Active,
            )),
            Arc::new(billing_provider),
        );

        let result = usecase.create(account_id, create_model(0)).await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn insert_collision_is_conflict() {
        let account_id = Uuid::new_v4();

        let mut subscription_repo = no_subscription_repo();
        subscription_repo
            .expect_insert()
            .returning(|_| Box::pin(async { Ok(InsertSubscriptionOutcome::AlreadyExists) }));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .returning(|_, _, _| Ok("cus_1".to_string()));
        billing_provider
            .expect_create_subscription()
            .returning(|_, _, _, _| Ok(provider_subscription(SubscriptionStatus::Incomplete)));

        let usecase = SubscriptionUseCase::new(
            Arc::new(known_account_repo(account_id)),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let result = usecase.create(account_id, create_model(0)).await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_failure_and_nothing_is_stored() {
        let account_id = Uuid::new_v4();

        let mut subscription_repo = no_subscription_repo();
        subscription_repo.expect_insert().times(0);

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .returning(|_, _, _| Ok("cus_1".to_string()));
        billing_provider
            .expect_create_subscription()
            .returning(|_, _, _, _| Err(anyhow!("stripe timeout")));

        let usecase = SubscriptionUseCase::new(
            Arc::new(known_account_repo(account_id)),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let result = usecase.create(account_id, create_model(0)).await;

        assert!(matches!(result, Err(UseCaseError::UpstreamFailure)));
    }

    #[tokio::test]
    async fn invalid_create_input_is_rejected_before_store_access() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_account().times(0);

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(subscription_repo),
            Arc::new(MockBillingProvider::new()),
        );

        let blank_price = CreateSubscriptionModel {
            price_id: " ".to_string(),
            trial_period_days: 0,
        };
        assert!(matches!(
            usecase.create(Uuid::new_v4(), blank_price).await,
            Err(UseCaseError::Validation(_))
        ));
        assert!(matches!(
            usecase.create(Uuid::new_v4(), create_model(-1)).await,
            Err(UseCaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn status_derives_flags_from_stored_status() {
        let account_id = Uuid::new_v4();

        for status in SubscriptionStatus::ALL {
            let usecase = SubscriptionUseCase::new(
                Arc::new(MockAccountRepository::new()),
                Arc::new(existing_subscription_repo(account_id, status)),
                Arc::new(MockBillingProvider::new()),
            );

            let dto = usecase.status(account_id).await.unwrap();

            assert_eq!(dto.status, status);
            assert_eq!(
                dto.is_active,
                matches!(status, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
            );
            assert_eq!(dto.is_trialing, status == SubscriptionStatus::Trialing);
        }
    }

    #[tokio::test]
    async fn status_without_subscription_is_not_found() {
        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(no_subscription_repo()),
            Arc::new(MockBillingProvider::new()),
        );

        let result = usecase.status(Uuid::new_v4()).await;

        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn cancel_projects_provider_snapshot() {
        let account_id = Uuid::new_v4();
        let period_end = Utc::now() + Duration::days(12);

        let mut subscription_repo =
            existing_subscription_repo(account_id, SubscriptionStatus::Active);
        subscription_repo
            .expect_apply_snapshot()
            .withf(|snapshot| {
                snapshot.provider_subscription_id == "sub_1"
                    && snapshot.cancel_at_period_end == Some(true)
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(1) }));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_cancel_at_period_end()
            .with(eq("sub_1"))
            .times(1)
            .returning(move |_| {
                let mut canceled = snapshot(SubscriptionStatus::Active, period_end);
                canceled.cancel_at_period_end = Some(true);
                Ok(canceled)
            });

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(subscription_repo),
            Arc::new(billing_provider),
        );

        let canceled = usecase.cancel(account_id).await.unwrap();

        assert!(canceled.cancel_at_period_end);
        assert_eq!(canceled.current_period_end, Some(period_end));
    }

    #[tokio::test]
    async fn client_secret_requires_pending_confirmation() {
        let account_id = Uuid::new_v4();

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_retrieve_subscription().times(0);

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(existing_subscription_repo(
                account_id,
                SubscriptionStatus::Active,
            )),
            Arc::new(billing_provider),
        );

        let result = usecase.client_secret(account_id).await;

        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }

    #[tokio::test]
    async fn client_secret_prefers_setup_intent() {
        let account_id = Uuid::new_v4();

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_retrieve_subscription()
            .with(eq("sub_1"))
            .returning(|_| Ok(provider_subscription(SubscriptionStatus::Trialing)));

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(existing_subscription_repo(
                account_id,
                SubscriptionStatus::Trialing,
            )),
            Arc::new(billing_provider),
        );

        let secret = usecase.client_secret(account_id).await.unwrap();

        assert_eq!(
            secret,
            ClientSecretDto {
                client_secret: "seti_secret".to_string(),
                setup_required: true,
            }
        );
    }

    #[tokio::test]
    async fn client_secret_without_intents_is_not_found() {
        let account_id = Uuid::new_v4();

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_retrieve_subscription().returning(|_| {
            let mut pending = provider_subscription(SubscriptionStatus::Incomplete);
            pending.setup_intent_secret = None;
            pending.payment_intent_secret = None;
            Ok(pending)
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(existing_subscription_repo(
                account_id,
                SubscriptionStatus::Incomplete,
            )),
            Arc::new(billing_provider),
        );

        let result = usecase.client_secret(account_id).await;

        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }
}
