use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};
use crate::domain::value_objects::subscriptions::{
    InsertSubscriptionOutcome, SubscriptionSnapshot,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// `AlreadyExists` when either unique key (account, provider
    /// subscription) is already taken.
    async fn insert(
        &self,
        subscription: InsertSubscriptionEntity,
    ) -> Result<InsertSubscriptionOutcome>;

    /// Writes a provider snapshot onto the row carrying its provider
    /// subscription id. Returns the number of rows touched.
    async fn apply_snapshot(&self, snapshot: SubscriptionSnapshot) -> Result<usize>;
}
