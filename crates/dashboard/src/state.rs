//! Application state shared across handlers.

use std::sync::Arc;

use database::{chat_message, ChatMessage, Database, Direction, NewChatMessage};
use green_api::Gateway;
use notification_sync::SyncReport;
use tracing::info;

use crate::error::Result;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Green-API gateway.
    pub gateway: Arc<dyn Gateway>,
    /// Upper bound on notifications pulled per sync.
    pub max_pull: usize,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, gateway: Arc<dyn Gateway>, max_pull: usize) -> Self {
        Self {
            db,
            gateway,
            max_pull,
        }
    }

    /// Send a message through the gateway and log it as outgoing.
    ///
    /// Nothing is stored unless the gateway accepts the send.
    pub async fn send_message(&self, chat_id: &str, message: &str) -> Result<ChatMessage> {
        let record = NewChatMessage::new(chat_id.trim(), message, Direction::Outgoing)?;

        let response = self
            .gateway
            .send_message(record.chat_id(), record.message())
            .await?;

        let stored = chat_message::insert_message(self.db.pool(), &record).await?;
        info!(
            id = stored.id,
            chat_id = %stored.chat_id,
            gateway_id = ?response.id_message,
            "Message sent"
        );

        Ok(stored)
    }

    /// Drain the gateway notification queue into the log.
    pub async fn sync(&self) -> Result<SyncReport> {
        let report =
            notification_sync::drain(self.gateway.as_ref(), self.db.pool(), self.max_pull).await?;
        Ok(report)
    }

    /// Most recent log entries, newest first.
    pub async fn recent_messages(&self, limit: i64) -> Result<Vec<ChatMessage>> {
        Ok(chat_message::recent_messages(self.db.pool(), limit).await?)
    }
}
