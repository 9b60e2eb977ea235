use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Level;
use tracing::warn;

const ROUTINE_QUEUE_CAPACITY: usize = 256;
const OPERATOR_QUEUE_CAPACITY: usize = 64;
/// Operator alerts mark states that need manual reconciliation, so a failed
/// delivery is tried again once.
const OPERATOR_DELIVERY_ATTEMPTS: usize = 2;
const OPERATOR_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Debug)]
pub(crate) struct SpanSummary {
    pub(crate) name: String,
    pub(crate) fields: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
pub(crate) struct AlertEvent {
    pub(crate) level: Level,
    /// Set when the event carried `operator_alert = true`.
    pub(crate) operator_alert: bool,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
    pub(crate) target: String,
    pub(crate) file: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) message: Option<String>,
    pub(crate) fields: BTreeMap<String, String>,
    pub(crate) spans: Vec<SpanSummary>,
}

impl AlertEvent {
    fn delivery_attempts(&self) -> usize {
        if self.operator_alert {
            OPERATOR_DELIVERY_ATTEMPTS
        } else {
            1
        }
    }
}

#[async_trait]
pub(crate) trait AlertSink: Send + Sync {
    async fn send(&self, event: &AlertEvent) -> Result<()>;
    fn sink_name(&self) -> &'static str;
}

/// Hands alerts to a background task so the logging call never waits on
/// the network. Operator alerts travel on their own queue, which the task
/// drains first; a burst of routine errors can fill the routine queue
/// without pushing an operator alert out.
#[derive(Clone)]
pub(crate) struct Notifier {
    operator_tx: mpsc::Sender<AlertEvent>,
    routine_tx: mpsc::Sender<AlertEvent>,
}

impl Notifier {
    pub(crate) fn spawn(sinks: Vec<Arc<dyn AlertSink>>) -> Self {
        let (operator_tx, mut operator_rx) = mpsc::channel::<AlertEvent>(OPERATOR_QUEUE_CAPACITY);
        let (routine_tx, mut routine_rx) = mpsc::channel::<AlertEvent>(ROUTINE_QUEUE_CAPACITY);

        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    biased;
                    Some(event) = operator_rx.recv() => event,
                    Some(event) = routine_rx.recv() => event,
                    else => break,
                };
                for sink in &sinks {
                    deliver(sink.as_ref(), &event).await;
                }
            }
        });

        Self {
            operator_tx,
            routine_tx,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_senders(
        operator_tx: mpsc::Sender<AlertEvent>,
        routine_tx: mpsc::Sender<AlertEvent>,
    ) -> Self {
        Self {
            operator_tx,
            routine_tx,
        }
    }

    pub(crate) fn try_notify(&self, event: AlertEvent) {
        let operator_alert = event.operator_alert;
        let queue = if operator_alert {
            &self.operator_tx
        } else {
            &self.routine_tx
        };

        match queue.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(operator_alert_dropped = operator_alert, "observability: alert queue full; dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(operator_alert_dropped = operator_alert, "observability: alert queue closed; dropping event");
            }
        }
    }
}

async fn deliver(sink: &dyn AlertSink, event: &AlertEvent) {
    let attempts = event.delivery_attempts();

    for attempt in 1..=attempts {
        match sink.send(event).await {
            Ok(()) => return,
            Err(error) => {
                warn!(
                    sink = sink.sink_name(),
                    attempt,
                    attempts,
                    operator_alert_dropped = event.operator_alert && attempt == attempts,
                    error = %error,
                    "observability: alert sink failed"
                );
                if attempt < attempts {
                    tokio::time::sleep(OPERATOR_RETRY_DELAY).await;
                }
            }
        }
    }
}
