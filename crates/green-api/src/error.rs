//! Error types for green-api.

use thiserror::Error;

/// Errors that can occur when calling the Green-API gateway.
#[derive(Debug, Error)]
pub enum GreenApiError {
    /// Credentials or base URL are missing.
    #[error("{0}")]
    Configuration(String),

    /// The gateway answered with a non-2xx status.
    #[error("Green-API returned HTTP {status}")]
    Status { status: u16, body: String },

    /// Transport failure: DNS, refused connection, timeout.
    #[error("Network error talking to Green-API: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response carried a body that is not JSON.
    #[error("Invalid JSON from Green-API: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl GreenApiError {
    /// HTTP status code, if the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GreenApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the gateway answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Diagnostic detail from the upstream error body.
    ///
    /// JSON bodies are re-serialized compactly; anything else is returned as
    /// trimmed text. Empty bodies and non-HTTP errors yield `None`.
    pub fn detail(&self) -> Option<String> {
        let GreenApiError::Status { body, .. } = self else {
            return None;
        };

        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => Some(value.to_string()),
            Err(_) => Some(body.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = GreenApiError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.detail(), None);

        let err = GreenApiError::Configuration("missing".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "missing");
    }

    #[test]
    fn test_detail_from_json_body() {
        let err = GreenApiError::Status {
            status: 400,
            body: "{ \"message\": \"chatId is invalid\" }".to_string(),
        };
        assert_eq!(err.detail().as_deref(), Some(r#"{"message":"chatId is invalid"}"#));
    }

    #[test]
    fn test_detail_from_text_body() {
        let err = GreenApiError::Status {
            status: 502,
            body: "  Bad Gateway \n".to_string(),
        };
        assert_eq!(err.detail().as_deref(), Some("Bad Gateway"));
    }
}
