use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::accounts::AccountEntity;

#[async_trait]
#[automock]
pub trait AccountRepository {
    /// Exact match on the stored address; callers trim before calling.
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountEntity>>;

    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>>;
}
