//! Green-API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GreenConfig;
use crate::error::GreenApiError;
use crate::gateway::Gateway;

/// Client for a single Green-API instance.
///
/// Stateless apart from the pooled HTTP connection; cheap to clone.
#[derive(Clone)]
pub struct GreenClient {
    http: Client,
    config: GreenConfig,
}

impl GreenClient {
    /// Build a client with the configured timeouts.
    ///
    /// Credentials are not checked here; see [`GreenConfig::endpoint_url`].
    pub fn new(config: GreenConfig) -> Result<Self, GreenApiError> {
        let http = Client::builder()
            .connect_timeout(config.timeout.connect())
            .read_timeout(config.timeout.read())
            .build()
            .map_err(GreenApiError::Network)?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &GreenConfig {
        &self.config
    }
}

/// Methods that conventionally carry a request body.
fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

#[async_trait]
impl Gateway for GreenClient {
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&Value>,
    ) -> Result<Value, GreenApiError> {
        let url = self.config.endpoint_url(endpoint)?;

        debug!(%method, endpoint, "Green-API call");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(data) = data.filter(|d| !d.is_null()) {
            request = if carries_body(&method) {
                request.json(data)
            } else {
                request.query(data)
            };
        }

        let response = request.send().await.map_err(|e| {
            // reqwest errors embed the URL, which carries the token.
            let e = e.without_url();
            warn!(%method, endpoint, error = %e, "Green-API request failed");
            GreenApiError::Network(e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GreenApiError::Network(e.without_url()))?;

        if !status.is_success() {
            debug!(%method, endpoint, status = status.as_u16(), "Green-API error response");
            return Err(GreenApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for GreenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenClient")
            .field("config", &self.config)
            .finish()
    }
}
