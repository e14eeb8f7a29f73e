use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::{info, warn};
use thiserror::Error;

const DEFAULT_POLL_INTERVAL_MS: &str = "2000";
const DEFAULT_EVENT_BUS_CAPACITY: &str = "64";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Process-wide settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` keeps the server up; submissions then fail with a configuration error.
    pub workflow_webhook_url: Option<String>,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub change_poll_interval: Duration,
    pub event_bus_capacity: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let workflow_webhook_url = var("WORKFLOW_WEBHOOK_URL").or_else(|| var("N8N_WEBHOOK_URL"));
        if workflow_webhook_url.is_none() {
            warn!("WORKFLOW_WEBHOOK_URL not set, review submissions will be rejected");
        }

        let poll_ms: u64 = try_load(&var, "CHANGE_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "CHANGE_POLL_INTERVAL_MS",
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            workflow_webhook_url,
            supabase_url: var("SUPABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .ok_or(ConfigError::Missing("SUPABASE_URL"))?,
            supabase_anon_key: var("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            change_poll_interval: Duration::from_millis(poll_ms),
            event_bus_capacity: try_load(&var, "EVENT_BUS_CAPACITY", DEFAULT_EVENT_BUS_CAPACITY)?,
        })
    }
}

fn try_load<T, F>(var: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}
