//! Chat message log operations.
//!
//! The log is append-only: there is no update or delete.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ChatMessage, NewChatMessage};

/// Append a record and return it with its id and timestamp.
///
/// Each call is its own implicit transaction, committed before returning.
pub async fn insert_message(pool: &SqlitePool, new: &NewChatMessage) -> Result<ChatMessage> {
    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (chat_id, message, direction)
        VALUES (?, ?, ?)
        RETURNING id, chat_id, message, direction, created_at
        "#,
    )
    .bind(new.chat_id())
    .bind(new.message())
    .bind(new.direction())
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        id = message.id,
        chat_id = %message.chat_id,
        direction = %message.direction,
        "Stored chat message"
    );

    Ok(message)
}

/// Get a record by ID.
pub async fn get_message(pool: &SqlitePool, id: i64) -> Result<ChatMessage> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, chat_id, message, direction, created_at
        FROM chat_messages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "ChatMessage",
        id: id.to_string(),
    })
}

/// The `limit` most recent records, newest first.
///
/// Records sharing a timestamp are ordered by id, newest first.
pub async fn recent_messages(pool: &SqlitePool, limit: i64) -> Result<Vec<ChatMessage>> {
    let rows = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, chat_id, message, direction, created_at
        FROM chat_messages
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count all records.
pub async fn count_messages(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_messages")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
