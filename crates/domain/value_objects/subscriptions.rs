use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::subscriptions::{
    SubscriptionEntity, SubscriptionProjectionEntity,
};
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSubscriptionModel {
    pub price_id: String,
    #[serde(default)]
    pub trial_period_days: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreatedSubscriptionDto {
    pub subscription_id: String,
    pub client_secret: Option<String>,
    pub status: SubscriptionStatus,
    pub setup_required: bool,
    pub trial_period: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionStatusDto {
    pub id: Uuid,
    pub status: SubscriptionStatus,
    pub price_id: String,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
    pub is_active: bool,
    pub is_trialing: bool,
}

impl SubscriptionStatusDto {
    pub fn from_entity(entity: SubscriptionEntity, status: SubscriptionStatus) -> Self {
        Self {
            id: entity.id,
            status,
            price_id: entity.provider_price_id,
            current_period_start: entity.current_period_start,
            current_period_end: entity.current_period_end,
            trial_start: entity.trial_start,
            trial_end: entity.trial_end,
            cancel_at_period_end: entity.cancel_at_period_end,
            is_active: status.is_active(),
            is_trialing: status.is_trialing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CanceledSubscriptionDto {
    pub cancel_at_period_end: bool,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientSecretDto {
    pub client_secret: String,
    pub setup_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSubscriptionOutcome {
    Inserted,
    AlreadyExists,
}

/// What the provider reports about one subscription, either in an event
/// payload or echoed back from an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionSnapshot {
    pub provider_subscription_id: String,
    pub status: SubscriptionStatus,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub trial_start: Option<DateTime<Utc>>,
    pub trial_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: Option<bool>,
}

impl SubscriptionSnapshot {
    pub fn to_projection(&self, now: DateTime<Utc>) -> SubscriptionProjectionEntity {
        SubscriptionProjectionEntity {
            status: self.status.to_string(),
            current_period_start: self.current_period_start,
            current_period_end: self.current_period_end,
            trial_start: self.trial_start,
            trial_end: self.trial_end,
            cancel_at_period_end: self.cancel_at_period_end,
            updated_at: now,
        }
    }
}

/// Provider objects produced by a successful create call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSubscription {
    pub snapshot: SubscriptionSnapshot,
    pub customer_id: String,
    pub setup_intent_secret: Option<String>,
    pub payment_intent_secret: Option<String>,
}

impl ProviderSubscription {
    /// Setup intent wins when present: a trial collects a payment method
    /// without charging.
    pub fn client_secret(&self) -> Option<ClientSecretDto> {
        if let Some(secret) = &self.setup_intent_secret {
            return Some(ClientSecretDto {
                client_secret: secret.clone(),
                setup_required: true,
            });
        }

        self.payment_intent_secret
            .as_ref()
            .map(|secret| ClientSecretDto {
                client_secret: secret.clone(),
                setup_required: false,
            })
    }
}
