//! Error types for the dashboard.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the dashboard.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Rejected form or API input.
    #[error("{0}")]
    Validation(#[from] database::ValidationError),

    /// Gateway call failed.
    #[error("{0}")]
    Gateway(#[from] green_api::GreenApiError),

    /// Notification drain failed.
    #[error("{0}")]
    Sync(#[from] notification_sync::SyncError),
}

impl AdminError {
    /// Upstream detail, if the gateway sent an error body.
    pub fn detail(&self) -> Option<String> {
        match self {
            AdminError::Gateway(err) => err.detail(),
            AdminError::Sync(err) => err.detail(),
            _ => None,
        }
    }

    /// Message for the operator, with upstream detail appended.
    pub fn display_with_detail(&self) -> String {
        match self.detail() {
            Some(detail) => format!("{} {}", self, detail),
            None => self.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        use green_api::GreenApiError;
        use notification_sync::SyncError;

        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Gateway(GreenApiError::Configuration(_))
            | AdminError::Sync(SyncError::Gateway(GreenApiError::Configuration(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AdminError::Gateway(_) | AdminError::Sync(SyncError::Gateway(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AdminError::Database(_) | AdminError::Sync(SyncError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, detail = ?self.detail(), "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "detail": self.detail(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, AdminError>;
