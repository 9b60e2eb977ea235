use super::notifier::{AlertEvent, AlertSink};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::Client;
use serde_json::json;
use url::Url;

const CONTENT_LIMIT: usize = 2000;

/// Posts alerts to a chat incoming-webhook. The body carries the text under
/// both `content` and `text` so Discord and Slack style hooks accept it.
pub(crate) struct AlertWebhookSink {
    webhook_url: Url,
    client: Client,
}

impl AlertWebhookSink {
    pub(crate) fn new(webhook_url: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(3))
            .build()
            .map_err(|_| anyhow!("alert webhook client failed to build"))?;

        Ok(Self {
            webhook_url,
            client,
        })
    }
}

pub(crate) fn format_content(event: &AlertEvent) -> String {
    let mut lines = Vec::new();

    let headline = if event.operator_alert {
        format!("{} (operator alert)", event.level.as_str())
    } else {
        event.level.as_str().to_string()
    };
    lines.push(format!(
        "**{}** `{}` `{}` `{}`",
        event.service_name, event.environment, event.component, headline
    ));

    lines.push(format!(
        "`{}` `{}`{}",
        event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        event.target,
        match (&event.file, event.line) {
            (Some(file), Some(line)) => format!(" `{}:{}`", file, line),
            _ => String::new(),
        }
    ));

    if let Some(message) = event.message.as_ref().filter(|m| !m.trim().is_empty()) {
        lines.push(format!("> {}", message.trim()));
    }

    if !event.spans.is_empty() {
        let span_chain = event
            .spans
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ");
        lines.push(format!("spans: `{}`", span_chain));
    }

    for (k, v) in &event.fields {
        lines.push(format!("- `{}` = `{}`", k, v));
    }

    for span in event.spans.iter().filter(|span| !span.fields.is_empty()) {
        lines.push(format!("span `{}`:", span.name));
        for (k, v) in &span.fields {
            lines.push(format!("- `{}` = `{}`", k, v));
        }
    }

    truncate(lines.join("\n"))
}

#[async_trait]
impl AlertSink for AlertWebhookSink {
    async fn send(&self, event: &AlertEvent) -> Result<()> {
        let content = format_content(event);

        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&json!({ "content": content, "text": content }))
            .send()
            .await
            .map_err(sanitize_reqwest_error)?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(anyhow!(
            "alert webhook returned non-success status: {}",
            response.status()
        ))
    }

    fn sink_name(&self) -> &'static str {
        "alert_webhook"
    }
}

/// reqwest errors print the URL, which carries the webhook token.
fn sanitize_reqwest_error(error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("alert webhook request timed out");
    }
    if error.is_connect() {
        return anyhow!("alert webhook connection failed");
    }
    anyhow!("alert webhook request failed")
}

fn truncate(content: String) -> String {
    const SUFFIX: &str = "\n… (truncated)";

    if content.chars().count() <= CONTENT_LIMIT {
        return content;
    }

    let allowed = CONTENT_LIMIT.saturating_sub(SUFFIX.chars().count());
    let mut truncated: String = content.chars().take(allowed).collect();
    truncated.push_str(SUFFIX);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use tracing::Level;

    fn alert(message: &str) -> AlertEvent {
        AlertEvent {
            level: Level::WARN,
            operator_alert: true,
            timestamp: Utc::now(),
            service_name: "carnet".to_string(),
            environment: "prod".to_string(),
            component: "backend".to_string(),
            target: "backend::usecases::subscriptions".to_string(),
            file: Some("backend/src/usecases/subscriptions.rs".to_string()),
            line: Some(42),
            message: Some(message.to_string()),
            fields: BTreeMap::from([("account_id".to_string(), "abc".to_string())]),
            spans: Vec::new(),
        }
    }

    #[test]
    fn headline_marks_operator_alerts() {
        let content = format_content(&alert("orphaned provider subscription"));

        assert!(content.starts_with("**carnet** `prod` `backend` `WARN (operator alert)`"));
        assert!(content.contains("> orphaned provider subscription"));
        assert!(content.contains("- `account_id` = `abc`"));
    }

    #[test]
    fn long_content_is_truncated() {
        let content = format_content(&alert(&"x".repeat(5000)));

        assert_eq!(content.chars().count(), CONTENT_LIMIT);
        assert!(content.ends_with("(truncated)"));
    }
}
