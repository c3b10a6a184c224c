//! Configuration types for the Green-API client.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::GreenApiError;

/// Default gateway base URL.
pub const DEFAULT_API_URL: &str = "https://api.green-api.com";

/// Request timeout applied to every gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// One value used for both connecting and reading.
    Single(Duration),
    /// Separate connect and read timeouts.
    Split { connect: Duration, read: Duration },
}

impl Timeout {
    /// Timeout for establishing the connection.
    pub fn connect(&self) -> Duration {
        match self {
            Timeout::Single(d) => *d,
            Timeout::Split { connect, .. } => *connect,
        }
    }

    /// Timeout for each read of the response.
    pub fn read(&self) -> Duration {
        match self {
            Timeout::Single(d) => *d,
            Timeout::Split { read, .. } => *read,
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::Split {
            connect: Duration::from_secs(5),
            read: Duration::from_secs(10),
        }
    }
}

/// Error returned when a timeout string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timeout '{0}': expected seconds or 'connect,read'")]
pub struct ParseTimeoutError(String);

impl FromStr for Timeout {
    type Err = ParseTimeoutError;

    /// Parse `"15"` or `"5,10"` (whole seconds). Blank parts are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u64>().map(Duration::from_secs))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseTimeoutError(s.to_string()))?;

        match parts.as_slice() {
            [single] => Ok(Timeout::Single(*single)),
            [connect, read] => Ok(Timeout::Split {
                connect: *connect,
                read: *read,
            }),
            _ => Err(ParseTimeoutError(s.to_string())),
        }
    }
}

/// Configuration for talking to a Green-API instance.
///
/// Credentials are optional here so a misconfigured deployment still starts;
/// every call made without them fails with [`GreenApiError::Configuration`].
#[derive(Clone)]
pub struct GreenConfig {
    /// Base URL of the gateway (e.g., "https://7103.api.green-api.com").
    pub api_url: String,
    /// Instance identifier.
    pub instance_id: Option<String>,
    /// API token for the instance.
    pub api_token: Option<String>,
    /// Request timeout.
    pub timeout: Timeout,
}

impl GreenConfig {
    /// Create a new configuration with the given base URL and no credentials.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            instance_id: None,
            api_token: None,
            timeout: Timeout::default(),
        }
    }

    /// Create configuration with instance credentials.
    pub fn with_credentials(
        api_url: impl Into<String>,
        instance_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: Some(instance_id.into()),
            api_token: Some(api_token.into()),
            ..Self::new(api_url)
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the URL for an endpoint: `{base}/waInstance{id}/{endpoint}/{token}`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String, GreenApiError> {
        let base = self.api_url.trim().trim_end_matches('/');
        let instance_id = non_blank(self.instance_id.as_deref());
        let token = non_blank(self.api_token.as_deref());

        match (base.is_empty(), instance_id, token) {
            (false, Some(id), Some(token)) => Ok(format!(
                "{}/waInstance{}/{}/{}",
                base,
                id,
                endpoint.trim_matches('/'),
                token
            )),
            _ => Err(GreenApiError::Configuration(
                "base URL, instance id and API token must be configured".to_string(),
            )),
        }
    }
}

impl Default for GreenConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for GreenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenConfig")
            .field("api_url", &self.api_url)
            .field("instance_id", &self.instance_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
