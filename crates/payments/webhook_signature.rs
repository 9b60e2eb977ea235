//! Stripe webhook signature checks.
//!
//! The `Stripe-Signature` header looks like `t=1700000000,v1=<hex>,v1=<hex>`.
//! The signed payload is `"{t}.{raw body}"` under HMAC-SHA256 with the
//! endpoint secret. Any `v1` entry may match (secret rotation sends two).

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("missing timestamp in stripe-signature")]
    MissingTimestamp,
    #[error("missing v1 signature in stripe-signature")]
    MissingSignature,
    #[error("stripe-signature timestamp outside tolerance")]
    TimestampOutsideTolerance,
    #[error("invalid webhook signature")]
    SignatureMismatch,
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(String),
}

impl WebhookError {
    /// Signature problems are authentication failures; a correctly signed
    /// body that cannot be decoded is a client error.
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, WebhookError::MalformedPayload(_))
    }
}

pub struct WebhookVerifier {
    secret: String,
    tolerance: Duration,
}

impl WebhookVerifier {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            tolerance: Duration::seconds(DEFAULT_TOLERANCE_SECS),
        }
    }

    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: DateTime<Utc>,
    ) -> Result<(), WebhookError> {
        let mut timestamp: Option<&str> = None;
        let mut candidates: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            let part = part.trim();
            if let Some(rest) = part.strip_prefix("t=") {
                timestamp = Some(rest);
            } else if let Some(rest) = part.strip_prefix("v1=") {
                candidates.push(rest);
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MissingTimestamp)?;
        if candidates.is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        let signed_at = timestamp
            .parse::<i64>()
            .map_err(|_| WebhookError::MissingTimestamp)?;
        let skew = now
            .timestamp()
            .checked_sub(signed_at)
            .and_then(i64::checked_abs)
            .ok_or(WebhookError::TimestampOutsideTolerance)?;
        if skew > self.tolerance.num_seconds() {
            return Err(WebhookError::TimestampOutsideTolerance);
        }

        let matched = candidates.iter().any(|candidate| {
            let Ok(provided) = hex::decode(candidate) else {
                return false;
            };
            let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
                return false;
            };
            mac.update(timestamp.as_bytes());
            mac.update(b".");
            mac.update(payload);
            mac.verify_slice(&provided).is_ok()
        });

        if matched {
            Ok(())
        } else {
            Err(WebhookError::SignatureMismatch)
        }
    }
}

#[cfg(test)]
pub(crate) fn sign(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
