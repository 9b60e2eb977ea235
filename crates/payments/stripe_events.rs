use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::value_objects::billing_events::{
    BillingEffect, BillingEvent, INVOICE_PAYMENT_FAILED, INVOICE_PAYMENT_SUCCEEDED,
    PAYMENT_INTENT_FAILED, PAYMENT_INTENT_SUCCEEDED, SUBSCRIPTION_DELETED, SUBSCRIPTION_UPDATED,
};
use crate::payments::{
    stripe_client::{StripeSubscription, unix_to_utc},
    webhook_signature::WebhookError,
};

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    pub fn from_slice(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|err| WebhookError::MalformedPayload(err.to_string()))
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(unix_to_utc)
    }

    fn object_id(&self) -> Option<String> {
        self.data
            .object
            .get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
    }

    /// Decodes the payload for the event types the ledger acts on. Other
    /// types map to [`BillingEffect::Ignore`] without inspecting the object.
    pub fn to_billing_event(&self) -> Result<BillingEvent, WebhookError> {
        let effect = match self.type_.as_str() {
            SUBSCRIPTION_UPDATED | SUBSCRIPTION_DELETED => {
                let subscription: StripeSubscription =
                    serde_json::from_value(self.data.object.clone())
                        .map_err(|err| WebhookError::MalformedPayload(err.to_string()))?;
                let snapshot = subscription
                    .snapshot()
                    .map_err(|err| WebhookError::MalformedPayload(err.to_string()))?;
                BillingEffect::ProjectSubscription(snapshot)
            }
            INVOICE_PAYMENT_SUCCEEDED
            | INVOICE_PAYMENT_FAILED
            | PAYMENT_INTENT_SUCCEEDED
            | PAYMENT_INTENT_FAILED => {
                if self.object_id().is_none() {
                    return Err(WebhookError::MalformedPayload(format!(
                        "{} without object id",
                        self.type_
                    )));
                }
                BillingEffect::AuditOnly
            }
            _ => BillingEffect::Ignore,
        };

        Ok(BillingEvent {
            id: self.id.clone(),
            event_type: self.type_.clone(),
            created: self.created_at(),
            object_id: self.object_id(),
            effect,
        })
    }
}
