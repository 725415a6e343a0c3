use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
pub const DEFAULT_POSTS_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_SCORING_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_INGEST_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub posts_api_base: String,
    pub ingest_api_base: String,
    pub scoring_api_base: String,
    pub ingest_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests can avoid the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |var: &str, default: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let number = |var: &str| -> Result<Option<u64>, ConfigError> {
            match lookup(var).map(|value| value.trim().to_string()) {
                None => Ok(None),
                Some(value) if value.is_empty() => Ok(None),
                Some(value) => value.parse::<u64>().map(Some).map_err(|_| ConfigError::Invalid {
                    var: var.to_string(),
                    value,
                }),
            }
        };

        let port = match number("PORT")? {
            None => DEFAULT_PORT,
            Some(port) => u16::try_from(port).map_err(|_| ConfigError::Invalid {
                var: "PORT".to_string(),
                value: port.to_string(),
            })?,
        };
        let ingest_timeout_secs = number("INGEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_INGEST_TIMEOUT_SECS);

        Ok(Self {
            port,
            data_path: PathBuf::from(text("APP_DATA_PATH", DEFAULT_DATA_PATH)),
            posts_api_base: base_url(text("POSTS_API_BASE", DEFAULT_POSTS_API_BASE)),
            ingest_api_base: base_url(text("INGEST_API_BASE", DEFAULT_POSTS_API_BASE)),
            scoring_api_base: base_url(text("SCORING_API_BASE", DEFAULT_SCORING_API_BASE)),
            ingest_timeout: Duration::from_secs(ingest_timeout_secs),
        })
    }
}

fn base_url(value: String) -> String {
    value.trim_end_matches('/').to_string()
}
