//! Notification types delivered by Green-API, via polling or webhook.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One queued notification returned by `receiveNotification`.
///
/// The body is kept as raw JSON so a malformed body never prevents the
/// receipt from being acknowledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Handle used to delete the notification from the queue.
    #[serde(default)]
    pub receipt_id: Option<u64>,

    /// Raw notification body.
    #[serde(default)]
    pub body: Value,
}

impl Notification {
    /// Decode the body into its typed form.
    pub fn parse_body(&self) -> Result<NotificationBody, serde_json::Error> {
        NotificationBody::deserialize(&self.body)
    }
}

/// Payload POSTed by Green-API to a webhook URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// The notification body.
    #[serde(default)]
    pub body: NotificationBody,
}

/// A notification body, shared by webhooks and the polling queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    /// Webhook kind (e.g., "incomingMessageReceived").
    #[serde(default)]
    pub type_webhook: Option<String>,

    /// Gateway message id.
    #[serde(default)]
    pub id_message: Option<String>,

    /// Event time (seconds since epoch).
    #[serde(default)]
    pub timestamp: Option<i64>,

    /// Sender information for message webhooks.
    #[serde(default)]
    pub sender_data: Option<SenderData>,

    /// Chat id carried at the top level by status webhooks.
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Message content, kept raw so summaries reproduce every field.
    /// Use [`NotificationBody::message`] for the typed view.
    #[serde(default)]
    pub message_data: Option<Value>,

    /// Delivery status section (e.g., "delivered", "read").
    #[serde(default)]
    pub status: Option<Value>,
}

impl NotificationBody {
    /// Chat id of the conversation, preferring `senderData.chatId`.
    pub fn chat_id(&self) -> Option<&str> {
        self.sender_data
            .as_ref()
            .and_then(|s| s.chat_id.as_deref())
            .or(self.chat_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Typed view of the message section.
    ///
    /// `None` when the section is absent or its known fields have an
    /// unexpected shape; the raw JSON stays available in `message_data`.
    pub fn message(&self) -> Option<MessageData> {
        self.message_data
            .as_ref()
            .and_then(|raw| MessageData::deserialize(raw).ok())
    }
}

/// Sender information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderData {
    /// Chat id (e.g., "34600000000@c.us" or a group "...@g.us").
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Sender id within the chat.
    #[serde(default)]
    pub sender: Option<String>,

    /// Sender display name.
    #[serde(default)]
    pub sender_name: Option<String>,
}

/// The message section of a notification body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    /// Message kind tag (e.g., "textMessage", "imageMessage").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_message: Option<String>,

    /// Plain text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_message_data: Option<TextMessageData>,

    /// Extended or quoted text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_text_message_data: Option<ExtendedTextMessageData>,

    /// File content (image, video, audio, document).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_message_data: Option<FileMessageData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Older payloads use `textMessage` instead of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stanza_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_incoming_text() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "body": {
                "typeWebhook": "incomingMessageReceived",
                "idMessage": "BAE5F4",
                "timestamp": 1700000000,
                "senderData": { "chatId": "34600000000@c.us", "senderName": "Ana" },
                "messageData": {
                    "typeMessage": "textMessage",
                    "textMessageData": { "textMessage": "hola" }
                }
            }
        }))
        .unwrap();

        let body = payload.body;
        assert_eq!(body.type_webhook.as_deref(), Some("incomingMessageReceived"));
        assert_eq!(body.chat_id(), Some("34600000000@c.us"));
        let data = body.message().unwrap();
        assert_eq!(
            data.text_message_data.unwrap().text_message.as_deref(),
            Some("hola")
        );
    }

    #[test]
    fn test_raw_message_section_keeps_unknown_fields() {
        let body: NotificationBody = serde_json::from_value(json!({
            "messageData": {
                "typeMessage": "locationMessage",
                "locationMessageData": { "latitude": 40.4, "longitude": -3.7 },
                "fileMessageData": { "downloadUrl": "u", "jpegThumbnail": "AAAA" }
            }
        }))
        .unwrap();

        let raw = body.message_data.as_ref().unwrap();
        assert_eq!(raw["locationMessageData"]["latitude"], 40.4);
        assert_eq!(raw["fileMessageData"]["jpegThumbnail"], "AAAA");

        let typed = body.message().unwrap();
        assert_eq!(typed.type_message.as_deref(), Some("locationMessage"));
        assert_eq!(
            typed.file_message_data.unwrap().download_url.as_deref(),
            Some("u")
        );
    }

    #[test]
    fn test_misshapen_message_section_has_no_typed_view() {
        let body: NotificationBody = serde_json::from_value(json!({
            "messageData": { "typeMessage": "textMessage", "textMessageData": "hola" }
        }))
        .unwrap();
        assert!(body.message_data.is_some());
        assert!(body.message().is_none());
    }

    #[test]
    fn test_status_chat_id_fallback() {
        let body: NotificationBody = serde_json::from_value(json!({
            "typeWebhook": "outgoingMessageStatus",
            "chatId": "34600000000@c.us",
            "status": "delivered"
        }))
        .unwrap();
        assert_eq!(body.chat_id(), Some("34600000000@c.us"));
        assert_eq!(body.status, Some(json!("delivered")));
    }

    #[test]
    fn test_blank_chat_id_is_absent() {
        let body: NotificationBody = serde_json::from_value(json!({
            "senderData": { "chatId": "  " }
        }))
        .unwrap();
        assert_eq!(body.chat_id(), None);
    }

    #[test]
    fn test_notification_keeps_raw_body() {
        let notification: Notification = serde_json::from_value(json!({
            "receiptId": 7,
            "body": { "senderData": "not-an-object" }
        }))
        .unwrap();
        assert_eq!(notification.receipt_id, Some(7));
        assert!(notification.parse_body().is_err());
    }
}
