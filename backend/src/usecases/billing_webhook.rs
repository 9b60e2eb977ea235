use std::sync::Arc;

use carnet::{
    domain::{
        repositories::billing_events::BillingEventRepository,
        value_objects::billing_events::{
            BillingEffect, EventApplication, SUBSCRIPTION_DELETED, SUBSCRIPTION_UPDATED,
        },
    },
    payments::{
        stripe_events::StripeEvent,
        webhook_signature::{WebhookError, WebhookVerifier},
    },
};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::usecases::errors::{UseCaseError, UseCaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookAck {
    Applied,
    Duplicate,
    Ignored,
}

pub struct BillingWebhookUseCase<E>
where
    E: BillingEventRepository + Send + Sync + 'static,
{
    event_repo: Arc<E>,
    verifier: WebhookVerifier,
}

impl<E> BillingWebhookUseCase<E>
where
    E: BillingEventRepository + Send + Sync + 'static,
{
    pub fn new(event_repo: Arc<E>, verifier: WebhookVerifier) -> Self {
        Self {
            event_repo,
            verifier,
        }
    }

    /// Verifies, decodes and applies one delivery. Every accepted delivery
    /// is acknowledged, duplicates and unhandled types included, so the
    /// provider stops retrying.
    pub async fn handle(&self, payload: &[u8], signature: Option<&str>) -> UseCaseResult<WebhookAck> {
        let signature = signature.ok_or_else(|| {
            warn!("billing_webhook: missing stripe-signature header");
            UseCaseError::AuthenticationFailure("missing stripe-signature header".to_string())
        })?;

        self.verifier
            .verify(payload, signature, Utc::now())
            .map_err(|err| {
                warn!(error = %err, "billing_webhook: signature rejected");
                Self::map_webhook_error(err)
            })?;

        let event = StripeEvent::from_slice(payload)
            .and_then(|event| event.to_billing_event())
            .map_err(|err| {
                warn!(error = %err, "billing_webhook: undecodable event");
                Self::map_webhook_error(err)
            })?;

        let event_id = event.id.clone();
        let event_type = event.event_type.clone();

        if event.effect == BillingEffect::Ignore {
            debug!(%event_id, %event_type, "billing_webhook: event type not handled");
            return Ok(WebhookAck::Ignored);
        }

        let application = self.event_repo.apply_event(event).await.map_err(|err| {
            error!(%event_id, %event_type, db_error = ?err, "billing_webhook: failed to apply event");
            UseCaseError::StoreFailure
        })?;

        match application {
            EventApplication::Duplicate => {
                info!(%event_id, %event_type, "billing_webhook: duplicate event acknowledged");
                Ok(WebhookAck::Duplicate)
            }
            EventApplication::Applied { subscription_rows } => {
                if subscription_rows == 0 && event_type_projects(&event_type) {
                    warn!(
                        %event_id,
                        %event_type,
                        "billing_webhook: no local subscription for event, recorded only"
                    );
                } else {
                    info!(%event_id, %event_type, subscription_rows, "billing_webhook: event applied");
                }
                Ok(WebhookAck::Applied)
            }
        }
    }

    fn map_webhook_error(err: WebhookError) -> UseCaseError {
        if err.is_authentication_failure() {
            UseCaseError::AuthenticationFailure(err.to_string())
        } else {
            UseCaseError::Validation(err.to_string())
        }
    }
}

fn event_type_projects(event_type: &str) -> bool {
    matches!(event_type, SUBSCRIPTION_UPDATED | SUBSCRIPTION_DELETED)
}
