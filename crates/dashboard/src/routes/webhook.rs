//! Green-API webhook receiver.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use green_api::WebhookPayload;
use tracing::{error, warn};

use crate::state::AppState;

/// Receive a pushed notification.
///
/// Always answers 200 so the gateway does not retry; problems are logged.
pub async fn green_webhook(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, bytes = body.len(), "Ignoring undecodable webhook payload");
            return StatusCode::OK;
        }
    };

    match notification_sync::store_notification(state.db.pool(), &payload.body).await {
        Ok(outcome) => outcome.log("webhook"),
        Err(err) => error!(error = %err, "Failed to store webhook notification"),
    }

    StatusCode::OK
}
