//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use green_api::{GreenConfig, Timeout, DEFAULT_API_URL};
use notification_sync::DEFAULT_MAX_PULL;

/// Dashboard server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Gateway connection settings.
    pub green: GreenConfig,
    /// Upper bound on notifications pulled per sync.
    pub max_pull: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DASHBOARD_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:green_bridge.db?mode=rwc` |
    /// | `GREEN_API_URL` | Gateway base URL | `https://api.green-api.com` |
    /// | `GREEN_INSTANCE_ID` | Instance id | (unset) |
    /// | `GREEN_API_TOKEN` | Instance token | (unset) |
    /// | `GREEN_API_TIMEOUT` | `secs` or `connect,read` | `5,10` |
    /// | `GREEN_API_MAX_PULL` | Notifications per sync | `10` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("DASHBOARD_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8788".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite:green_bridge.db?mode=rwc".to_string());

        let timeout = match lookup("GREEN_API_TIMEOUT") {
            Some(raw) => raw
                .parse::<Timeout>()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Timeout::default(),
        };

        let max_pull = match lookup("GREEN_API_MAX_PULL") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMaxPull(raw))?
                .max(1),
            None => DEFAULT_MAX_PULL,
        };

        // Missing credentials are reported per call, not at startup.
        let green = GreenConfig {
            api_url: lookup("GREEN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            instance_id: lookup("GREEN_INSTANCE_ID"),
            api_token: lookup("GREEN_API_TOKEN"),
            timeout,
        };

        Ok(Self {
            addr,
            database_url,
            green,
            max_pull,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid DASHBOARD_ADDR format")]
    InvalidAddr,

    #[error("Invalid GREEN_API_TIMEOUT '{0}': expected seconds or 'connect,read'")]
    InvalidTimeout(String),

    #[error("Invalid GREEN_API_MAX_PULL '{0}': expected a positive integer")]
    InvalidMaxPull(String),
}
