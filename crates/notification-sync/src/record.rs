//! Turning a notification body into a stored record.
//!
//! Both the webhook handler and the drain loop go through
//! [`store_notification`], so they classify and normalize identically.

use database::{chat_message, ChatMessage, NewChatMessage};
use green_api::NotificationBody;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::normalize::{normalize, NormalizationGap};

/// What happened to one notification body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// A record was committed.
    Stored(ChatMessage),
    /// Nothing was stored.
    Discarded(NormalizationGap),
}

impl StoreOutcome {
    /// Log the outcome; discards are warnings.
    pub fn log(&self, source: &str) {
        match self {
            StoreOutcome::Stored(record) => info!(
                source,
                id = record.id,
                chat_id = %record.chat_id,
                direction = %record.direction,
                "Stored notification"
            ),
            StoreOutcome::Discarded(gap) => {
                warn!(source, reason = %gap, "Discarded notification")
            }
        }
    }
}

/// Normalize `body` and, if it yields a record, commit it immediately.
pub async fn store_notification(
    pool: &SqlitePool,
    body: &NotificationBody,
) -> database::Result<StoreOutcome> {
    let normalized = match normalize(body) {
        Ok(normalized) => normalized,
        Err(gap) => return Ok(StoreOutcome::Discarded(gap)),
    };

    let record = NewChatMessage::new(normalized.chat_id, normalized.text, normalized.direction)?;
    let stored = chat_message::insert_message(pool, &record).await?;

    Ok(StoreOutcome::Stored(stored))
}
