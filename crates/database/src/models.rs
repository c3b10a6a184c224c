//! Database models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{validate_chat_id, validate_message, ValidationError};

/// Which way a logged event travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Direction {
    /// Sent by this system.
    Outgoing,
    /// Received from a remote party.
    Incoming,
    /// Gateway-internal event, e.g. a delivery status.
    Service,
}

impl Direction {
    /// Lowercase name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
            Direction::Service => "service",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outgoing" => Ok(Direction::Outgoing),
            "incoming" => Ok(Direction::Incoming),
            "service" => Ok(Direction::Service),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// One persisted sent, received or service event. Never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Remote conversation id (e.g., "34600000000@c.us").
    pub chat_id: String,
    /// Human-readable text.
    pub message: String,
    /// Direction of the event.
    pub direction: Direction,
    /// Insertion timestamp (UTC, millisecond precision).
    pub created_at: String,
}

/// A record that has passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    chat_id: String,
    message: String,
    direction: Direction,
}

impl NewChatMessage {
    /// Validate and build a new record.
    pub fn new(
        chat_id: impl Into<String>,
        message: impl Into<String>,
        direction: Direction,
    ) -> Result<Self, ValidationError> {
        let chat_id = chat_id.into();
        let message = message.into();
        validate_chat_id(&chat_id)?;
        validate_message(&message)?;
        Ok(Self {
            chat_id,
            message,
            direction,
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
