use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::billing_events::{BillingEvent, EventApplication};

#[async_trait]
#[automock]
pub trait BillingEventRepository {
    /// Records the event id and applies its effect in one transaction.
    /// An id that is already recorded yields `Duplicate` and nothing is
    /// written.
    async fn apply_event(&self, event: BillingEvent) -> Result<EventApplication>;
}
