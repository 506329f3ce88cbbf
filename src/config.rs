use crate::metrics::songstats::DEFAULT_BASE_URL;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub songstats_api_url: String,
    pub songstats_api_key: String,
    pub jwt_secret: String,
    /// Upper bound on a single metric history fetch.
    pub metrics_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = required(&env_map, "DATABASE_PATH")?;

        let songstats_api_url = env_map
            .get("SONGSTATS_API_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let songstats_api_key = required(&env_map, "SONGSTATS_API_KEY")?;
        let jwt_secret = required(&env_map, "JWT_SECRET")?;

        let metrics_timeout_ms = env_map
            .get("METRICS_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("10000")
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "METRICS_TIMEOUT_MS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            port,
            database_path,
            songstats_api_url,
            songstats_api_key,
            jwt_secret,
            metrics_timeout: Duration::from_millis(metrics_timeout_ms),
        })
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}
