use chrono::{DateTime, Utc};

use crate::domain::entities::applied_billing_events::InsertAppliedBillingEventEntity;
use crate::domain::value_objects::subscriptions::SubscriptionSnapshot;

pub const SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";
pub const INVOICE_PAYMENT_SUCCEEDED: &str = "invoice.payment_succeeded";
pub const INVOICE_PAYMENT_FAILED: &str = "invoice.payment_failed";
pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const PAYMENT_INTENT_FAILED: &str = "payment_intent.payment_failed";

/// A verified provider event, already decoded into what the store needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingEvent {
    pub id: String,
    pub event_type: String,
    pub created: Option<DateTime<Utc>>,
    pub object_id: Option<String>,
    pub effect: BillingEffect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BillingEffect {
    ProjectSubscription(SubscriptionSnapshot),
    /// Recorded in the ledger for audit; subscription state is untouched.
    AuditOnly,
    Ignore,
}

impl BillingEvent {
    pub fn ledger_record(&self, now: DateTime<Utc>) -> InsertAppliedBillingEventEntity {
        InsertAppliedBillingEventEntity {
            event_id: self.id.clone(),
            event_type: self.event_type.clone(),
            provider_object_id: self.object_id.clone(),
            provider_created_at: self.created,
            applied_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventApplication {
    /// Newly recorded. `subscription_rows` is how many local rows the
    /// projection touched; zero when no local row matches.
    Applied { subscription_rows: usize },
    Duplicate,
}
