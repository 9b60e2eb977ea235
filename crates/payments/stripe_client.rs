use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::subscription_statuses::SubscriptionStatus,
    subscriptions::{ProviderSubscription, SubscriptionSnapshot},
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Minimal Stripe client built on reqwest. Every call carries the timeout
/// given at construction.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
}

/// Either a bare object id or the object itself when the request asked
/// for it to be expanded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Object(object) => Some(object),
            Expandable::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StripeIntent {
    pub id: String,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StripeInvoice {
    pub id: String,
    pub payment_intent: Option<Expandable<StripeIntent>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: Option<Expandable<serde_json::Value>>,
    pub status: String,
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
    pub billing_cycle_anchor: Option<i64>,
    pub trial_start: Option<i64>,
    pub trial_end: Option<i64>,
    pub cancel_at_period_end: Option<bool>,
    #[serde(default)]
    pub items: StripeSubscriptionItems,
    pub pending_setup_intent: Option<Expandable<StripeIntent>>,
    pub latest_invoice: Option<Expandable<StripeInvoice>>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct StripeSubscriptionItems {
    pub data: Vec<StripeSubscriptionItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StripeSubscriptionItem {
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
}

impl StripeSubscription {
    /// Returns the subscription period start timestamp, falling back to the first item
    /// or the billing cycle anchor when the top-level field is absent.
    pub fn period_start(&self) -> Option<i64> {
        self.current_period_start
            .or_else(|| {
                self.items
                    .data
                    .first()
                    .and_then(|item| item.current_period_start)
            })
            .or(self.billing_cycle_anchor)
    }

    /// Returns the subscription period end timestamp, falling back to the first item when needed.
    pub fn period_end(&self) -> Option<i64> {
        self.current_period_end.or_else(|| {
            self.items
                .data
                .first()
                .and_then(|item| item.current_period_end)
        })
    }

    pub fn customer_id(&self) -> Option<String> {
        match self.customer.as_ref()? {
            Expandable::Id(id) => Some(id.clone()),
            Expandable::Object(object) => object
                .get("id")
                .and_then(|id| id.as_str())
                .map(str::to_string),
        }
    }

    pub fn setup_intent_secret(&self) -> Option<String> {
        self.pending_setup_intent
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|intent| intent.client_secret.clone())
    }

    pub fn payment_intent_secret(&self) -> Option<String> {
        self.latest_invoice
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|invoice| invoice.payment_intent.as_ref())
            .and_then(Expandable::as_object)
            .and_then(|intent| intent.client_secret.clone())
    }

    pub fn snapshot(&self) -> Result<SubscriptionSnapshot> {
        let status = SubscriptionStatus::parse(&self.status).with_context(|| {
            format!("stripe reported unknown subscription status {:?}", self.status)
        })?;

        Ok(SubscriptionSnapshot {
            provider_subscription_id: self.id.clone(),
            status,
            current_period_start: self.period_start().and_then(unix_to_utc),
            current_period_end: self.period_end().and_then(unix_to_utc),
            trial_start: self.trial_start.and_then(unix_to_utc),
            trial_end: self.trial_end.and_then(unix_to_utc),
            cancel_at_period_end: self.cancel_at_period_end,
        })
    }

    pub fn into_provider_subscription(self) -> Result<ProviderSubscription> {
        let snapshot = self.snapshot()?;
        let customer_id = self
            .customer_id()
            .context("stripe subscription has no customer id")?;

        Ok(ProviderSubscription {
            snapshot,
            customer_id,
            setup_intent_secret: self.setup_intent_secret(),
            payment_intent_secret: self.payment_intent_secret(),
        })
    }
}

pub fn unix_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

impl StripeClient {
    pub fn new(secret_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build stripe http client")?;

        Ok(Self { http, secret_key })
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("request-id")
            .or_else(|| resp.headers().get("stripe-request-id"))
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let details = serde_json::from_str::<StripeErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);

        error!(
            status = %status,
            stripe_request_id = ?request_id,
            stripe_error_type = ?details.as_ref().and_then(|d| d.type_.as_deref()),
            stripe_error_code = ?details.as_ref().and_then(|d| d.code.as_deref()),
            stripe_error_param = ?details.as_ref().and_then(|d| d.param.as_deref()),
            stripe_error_message = ?details.as_ref().and_then(|d| d.message.as_deref()),
            context = %context,
            "stripe: api request failed"
        );

        anyhow::bail!(
            "Stripe API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }

    async fn post_form(
        &self,
        path: &str,
        body: &[(String, String)],
        context: &str,
    ) -> Result<reqwest::Response> {
        let resp = self
            .http
            .post(format!("{STRIPE_API_BASE}/{path}"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(body)
            .send()
            .await
            .with_context(|| format!("stripe request failed: {context}"))?;

        Self::ensure_success(resp, context).await
    }

    /// https://stripe.com/docs/api/customers/create
    pub async fn create_customer(
        &self,
        email: &str,
        name: &str,
        account_id: Uuid,
    ) -> Result<String> {
        let body = vec![
            ("email".to_string(), email.to_string()),
            ("name".to_string(), name.to_string()),
            ("metadata[account_id]".to_string(), account_id.to_string()),
        ];
        let resp = self.post_form("customers", &body, "create customer").await?;

        #[derive(Deserialize)]
        struct CustomerResp {
            id: String,
        }

        let parsed: CustomerResp = resp.json().await?;
        Ok(parsed.id)
    }

    /// Creates an incomplete subscription whose first payment (or trial
    /// setup) the client confirms with the returned intent secret.
    pub async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
        trial_period_days: i64,
        account_id: Uuid,
    ) -> Result<StripeSubscription> {
        let mut body = vec![
            ("customer".to_string(), customer_id.to_string()),
            ("items[0][price]".to_string(), price_id.to_string()),
            (
                "payment_behavior".to_string(),
                "default_incomplete".to_string(),
            ),
            (
                "payment_settings[save_default_payment_method]".to_string(),
                "on_subscription".to_string(),
            ),
            ("metadata[account_id]".to_string(), account_id.to_string()),
        ];

        if trial_period_days > 0 {
            body.push((
                "trial_period_days".to_string(),
                trial_period_days.to_string(),
            ));
            body.push(("expand[]".to_string(), "pending_setup_intent".to_string()));
        } else {
            body.push((
                "expand[]".to_string(),
                "latest_invoice.payment_intent".to_string(),
            ));
        }

        let resp = self
            .post_form("subscriptions", &body, "create subscription")
            .await?;
        let subscription: StripeSubscription = resp.json().await?;
        Ok(subscription)
    }

    /// Marks a Stripe subscription to cancel at period end and returns the
    /// updated object.
    pub async fn cancel_subscription(
        &self,
        provider_subscription_id: &str,
    ) -> Result<StripeSubscription> {
        // https://stripe.com/docs/api/subscriptions/cancel#cancel_subscription-at_period_end
        let body = vec![("cancel_at_period_end".to_string(), "true".to_string())];
        let resp = self
            .post_form(
                &format!("subscriptions/{provider_subscription_id}"),
                &body,
                "cancel subscription",
            )
            .await?;

        let subscription: StripeSubscription = resp.json().await?;
        Ok(subscription)
    }

    /// https://stripe.com/docs/api/subscriptions/retrieve
    pub async fn retrieve_subscription(&self, subscription_id: &str) -> Result<StripeSubscription> {
        let resp = self
            .http
            .get(format!("{STRIPE_API_BASE}/subscriptions/{subscription_id}"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .query(&[
                ("expand[]", "pending_setup_intent"),
                ("expand[]", "latest_invoice.payment_intent"),
            ])
            .send()
            .await
            .context("stripe request failed: retrieve subscription")?;
        let resp = Self::ensure_success(resp, "retrieve subscription").await?;

        let subscription: StripeSubscription = resp.json().await?;
        Ok(subscription)
    }
}
