use anyhow::{Context, Result};

use super::config_model::{Auth, BackendServer, Billing, Database, DotEnvyConfig};

pub const DEFAULT_BILLING_TIMEOUT_SECS: u64 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| lookup(key).with_context(|| format!("{key} is invalid"));

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let auth = Auth {
        jwt_secret: required("JWT_SECRET")?,
    };

    let billing = Billing {
        stripe_secret_key: required("STRIPE_SECRET_KEY")?,
        stripe_webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
        timeout_secs: match lookup("BILLING_TIMEOUT_SECS") {
            Some(value) => value.parse().context("BILLING_TIMEOUT_SECS is invalid")?,
            None => DEFAULT_BILLING_TIMEOUT_SECS,
        },
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        billing,
    })
}
