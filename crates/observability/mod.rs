mod alert_webhook;
mod config;
mod layer;
mod notifier;

use alert_webhook::AlertWebhookSink;
use anyhow::Result;
use config::ObservabilityConfig;
use layer::OperatorAlertLayer;
use notifier::Notifier;
use std::sync::Arc;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use layer::OPERATOR_ALERT_FIELD;

/// Installs the global subscriber. Must run inside a tokio runtime when an
/// alert sink is configured, since the notifier spawns its delivery task.
pub fn init_observability(component: &str) -> Result<()> {
    let mut config = ObservabilityConfig::from_env(component);

    let alert_layer = match config.alerts.as_ref() {
        Some(alerts) => match AlertWebhookSink::new(alerts.webhook_url.clone()) {
            Ok(sink) => Some(OperatorAlertLayer::new(
                Notifier::spawn(vec![Arc::new(sink)]),
                config.service_context.clone(),
                alerts.min_level,
            )),
            Err(err) => {
                config
                    .warnings
                    .push(format!("operator alerts disabled: {err}"));
                None
            }
        },
        None => None,
    };
    let alerts_enabled = alert_layer.is_some();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Local time so a TZ override shows its offset in log lines.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(alert_layer)
        .with(env_filter)
        .try_init()?;

    for warning in &config.warnings {
        warn!(
            service = %config.service_context.service_name,
            environment = %config.service_context.environment,
            component = %config.service_context.component,
            warning = %warning,
            "observability: config warning"
        );
    }

    info!(
        service = %config.service_context.service_name,
        environment = %config.service_context.environment,
        component = %config.service_context.component,
        alerts_enabled,
        "observability: initialized"
    );

    Ok(())
}
