//! JSON API endpoints.

use axum::extract::{Query, State};
use axum::Json;
use database::ChatMessage;
use notification_sync::SyncReport;
use serde::Deserialize;

use crate::error::Result;
use crate::routes::dashboard::DASHBOARD_LIMIT;
use crate::state::AppState;

const MAX_API_LIMIT: i64 = 500;

#[derive(Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}

/// Request to send a message.
#[derive(Deserialize)]
pub struct SendRequest {
    pub chat_id: String,
    pub message: String,
}

/// List recent log entries, newest first.
pub async fn messages_api(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<ChatMessage>>> {
    let limit = query.limit.unwrap_or(DASHBOARD_LIMIT).clamp(1, MAX_API_LIMIT);
    let messages = state.recent_messages(limit).await?;
    Ok(Json(messages))
}

/// Send a message and return the stored record.
pub async fn send_api(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> Result<Json<ChatMessage>> {
    let stored = state.send_message(&req.chat_id, &req.message).await?;
    Ok(Json(stored))
}

/// Drain the notification queue.
pub async fn sync_api(State(state): State<AppState>) -> Result<Json<SyncReport>> {
    let report = state.sync().await?;
    Ok(Json(report))
}
