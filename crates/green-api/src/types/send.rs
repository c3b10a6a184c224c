//! Types for sending messages through Green-API.

use serde::{Deserialize, Serialize};

/// Body of a `sendMessage` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParams {
    /// Target chat (e.g., "34600000000@c.us").
    pub chat_id: String,

    /// The message text.
    pub message: String,
}

impl SendMessageParams {
    /// Create params for a plain text message.
    pub fn text(chat_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message: message.into(),
        }
    }
}

/// Response to a `sendMessage` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    /// Gateway id of the sent message.
    #[serde(default)]
    pub id_message: Option<String>,
}
