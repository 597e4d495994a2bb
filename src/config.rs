//! Environment configuration.

use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default tracing directive; `RUST_LOG` still overrides it.
    pub log_level: String,
    pub http_addr: String,
    pub redis_url: String,
    pub cache_ttl: Duration,
    pub queue_name: String,
    pub start_consumer: bool,
    pub consumption_interval: Duration,
    pub consumer_batch_size: usize,
    pub activity_log_path: PathBuf,
    pub stats_cas_retries: u32,
}

impl Config {
    /// Read from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read from a fixed map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let loader = Loader { lookup };
        Ok(Self {
            log_level: loader.load("RUST_LOG_LEVEL", "info")?,
            http_addr: loader.load("HTTP_ADDR", "0.0.0.0:3000")?,
            redis_url: loader.load("REDIS_URL", "redis://127.0.0.1:6379")?,
            cache_ttl: Duration::from_secs(loader.load("REDIS_TTL", "600")?),
            queue_name: loader.load("QUEUE_NAME", "user-activity")?,
            start_consumer: loader.load("START_CONSUMER", "true")?,
            consumption_interval: Duration::from_millis(
                loader.load("MESSAGE_CONSUMPTION_INTERVAL", "600000")?,
            ),
            consumer_batch_size: loader.load_positive("CONSUMER_BATCH_SIZE", "25")?,
            activity_log_path: loader.load("ACTIVITY_LOG_PATH", "activity-log.jsonl")?,
            stats_cas_retries: loader.load_positive("STATS_CAS_RETRIES", "5")?,
        })
    }
}

struct Loader<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Loader<F> {
    fn load<T: FromStr>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T::Err: Display,
    {
        let raw = (self.lookup)(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        });
        raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: raw.clone(),
        })
    }

    fn load_positive<T>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr + Default + PartialEq,
        T::Err: Display,
    {
        let value: T = self.load(key, default)?;
        if value == T::default() {
            return Err(ConfigError::Invalid {
                key,
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(value)
    }
}
