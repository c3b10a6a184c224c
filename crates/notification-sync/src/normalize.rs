//! Turns gateway notification bodies into loggable text.

use database::validation::{MAX_CHAT_ID_LENGTH, MAX_MESSAGE_LENGTH};
use database::Direction;
use green_api::{MessageData, NotificationBody};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Summaries of unrecognised payloads are cut to this many characters.
pub const SUMMARY_MAX_CHARS: usize = 700;

/// Message kinds the gateway sends in `messageData.typeMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    /// Extended text and quoted replies.
    ExtendedText,
    Image,
    Video,
    Audio,
    Sticker,
    Document,
    /// Anything else; always summarized.
    Other(String),
}

impl From<&str> for MessageKind {
    fn from(tag: &str) -> Self {
        match tag {
            "textMessage" => MessageKind::Text,
            "extendedTextMessage" | "quotedMessage" => MessageKind::ExtendedText,
            "imageMessage" => MessageKind::Image,
            "videoMessage" => MessageKind::Video,
            "audioMessage" => MessageKind::Audio,
            "stickerMessage" => MessageKind::Sticker,
            "documentMessage" => MessageKind::Document,
            other => MessageKind::Other(other.to_string()),
        }
    }
}

/// Why a notification produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationGap {
    #[error("notification has no chat id")]
    MissingChatId,

    #[error("chat id is too long ({0} chars)")]
    InvalidChatId(usize),

    #[error("notification has no message text or status")]
    NoText,
}

/// A notification reduced to what the log stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    pub chat_id: String,
    pub text: String,
    pub direction: Direction,
}

/// Classify a notification by its `typeWebhook` tag.
pub fn classify_direction(body: &NotificationBody) -> Direction {
    match body.type_webhook.as_deref() {
        Some("incomingMessageReceived") => Direction::Incoming,
        Some("outgoingMessageReceived") | Some("outgoingAPIMessageReceived") => {
            Direction::Outgoing
        }
        _ => Direction::Service,
    }
}

/// Extract human-readable text from a notification body.
///
/// Returns `None` only when there is neither a message section nor a status
/// section. Text kinds return their text verbatim, even whitespace; an empty
/// text falls back to a summary of the raw section.
pub fn extract_text(body: &NotificationBody) -> Option<String> {
    if let Some(raw) = body.message_data.as_ref().filter(|d| !is_blank_value(d)) {
        return Some(message_text(raw));
    }

    body.status
        .as_ref()
        .filter(|s| !is_blank_value(s))
        .map(|status| summarize("status", status))
}

/// Chat id, text and direction, or the reason there is nothing to store.
pub fn normalize(body: &NotificationBody) -> Result<NormalizedMessage, NormalizationGap> {
    let chat_id = body.chat_id().ok_or(NormalizationGap::MissingChatId)?;

    let len = chat_id.chars().count();
    if len > MAX_CHAT_ID_LENGTH {
        return Err(NormalizationGap::InvalidChatId(len));
    }

    // The log never holds blank text.
    let text = extract_text(body)
        .map(|text| truncate_chars(&text, MAX_MESSAGE_LENGTH))
        .filter(|text| !text.trim().is_empty())
        .ok_or(NormalizationGap::NoText)?;

    Ok(NormalizedMessage {
        chat_id: chat_id.to_string(),
        text,
        direction: classify_direction(body),
    })
}

fn message_text(raw: &Value) -> String {
    let tag = raw
        .get("typeMessage")
        .and_then(Value::as_str)
        .unwrap_or_default();
    // Known fields with the wrong shape leave only the summary.
    let data = MessageData::deserialize(raw).unwrap_or_default();
    let caption = || {
        data.file_message_data
            .as_ref()
            .and_then(|f| non_blank(f.caption.as_deref()))
    };

    let text = match MessageKind::from(tag) {
        MessageKind::Text => data
            .text_message_data
            .as_ref()
            .and_then(|t| non_empty(t.text_message.as_deref())),
        MessageKind::ExtendedText => data.extended_text_message_data.as_ref().and_then(|t| {
            non_empty(t.text.as_deref()).or_else(|| non_empty(t.text_message.as_deref()))
        }),
        MessageKind::Image => Some(caption().unwrap_or_else(|| "[Imagen recibida]".to_string())),
        MessageKind::Video => Some(caption().unwrap_or_else(|| "[Video recibido]".to_string())),
        MessageKind::Audio => Some("[Audio recibido]".to_string()),
        MessageKind::Sticker => Some("[Sticker recibido]".to_string()),
        MessageKind::Document => {
            let name = data
                .file_message_data
                .as_ref()
                .and_then(|f| non_blank(f.file_name.as_deref()))
                .unwrap_or_else(|| "sin nombre".to_string());
            Some(format!("[Documento recibido: {}]", name))
        }
        MessageKind::Other(_) => None,
    };

    // Text kinds with no text fall back to a summary.
    text.unwrap_or_else(|| {
        let label = if tag.trim().is_empty() { "evento" } else { tag };
        summarize(label, raw)
    })
}

/// `[<label>] <compact JSON>`, with the JSON cut to [`SUMMARY_MAX_CHARS`].
pub fn summarize<T: Serialize + ?Sized>(label: &str, payload: &T) -> String {
    let json = serde_json::to_string(payload).unwrap_or_default();
    format!("[{}] {}", label, truncate_summary(&json))
}

fn truncate_summary(s: &str) -> String {
    if s.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = s.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> NotificationBody {
        serde_json::from_value(value).unwrap()
    }

    fn with_message(message_data: Value) -> NotificationBody {
        body(json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": { "chatId": "34600000000@c.us" },
            "messageData": message_data,
        }))
    }

    #[test]
    fn test_plain_text() {
        let b = with_message(json!({
            "typeMessage": "textMessage",
            "textMessageData": { "textMessage": "hola, ¿qué tal?" }
        }));
        assert_eq!(extract_text(&b).as_deref(), Some("hola, ¿qué tal?"));
    }

    #[test]
    fn test_extended_and_quoted_text() {
        let b = with_message(json!({
            "typeMessage": "extendedTextMessage",
            "extendedTextMessageData": { "text": "mira https://example.com" }
        }));
        assert_eq!(extract_text(&b).as_deref(), Some("mira https://example.com"));

        let b = with_message(json!({
            "typeMessage": "quotedMessage",
            "extendedTextMessageData": { "textMessage": "respuesta" }
        }));
        assert_eq!(extract_text(&b).as_deref(), Some("respuesta"));
    }

    #[test]
    fn test_media_placeholders_and_captions() {
        let image = with_message(json!({ "typeMessage": "imageMessage", "fileMessageData": {} }));
        assert_eq!(extract_text(&image).as_deref(), Some("[Imagen recibida]"));

        let captioned = with_message(json!({
            "typeMessage": "imageMessage",
            "fileMessageData": { "caption": "la playa" }
        }));
        assert_eq!(extract_text(&captioned).as_deref(), Some("la playa"));

        let video = with_message(json!({ "typeMessage": "videoMessage" }));
        assert_eq!(extract_text(&video).as_deref(), Some("[Video recibido]"));

        let video = with_message(json!({
            "typeMessage": "videoMessage",
            "fileMessageData": { "caption": "gol" }
        }));
        assert_eq!(extract_text(&video).as_deref(), Some("gol"));

        let audio = with_message(json!({
            "typeMessage": "audioMessage",
            "fileMessageData": { "caption": "ignored" }
        }));
        assert_eq!(extract_text(&audio).as_deref(), Some("[Audio recibido]"));

        let sticker = with_message(json!({ "typeMessage": "stickerMessage" }));
        assert_eq!(extract_text(&sticker).as_deref(), Some("[Sticker recibido]"));
    }

    #[test]
    fn test_document_name() {
        let named = with_message(json!({
            "typeMessage": "documentMessage",
            "fileMessageData": { "fileName": "factura.pdf" }
        }));
        assert_eq!(
            extract_text(&named).as_deref(),
            Some("[Documento recibido: factura.pdf]")
        );

        let unnamed = with_message(json!({ "typeMessage": "documentMessage" }));
        assert_eq!(
            extract_text(&unnamed).as_deref(),
            Some("[Documento recibido: sin nombre]")
        );
    }

    #[test]
    fn test_unknown_kind_is_summarized() {
        let b = with_message(json!({
            "typeMessage": "locationMessage",
            "locationMessageData": { "latitude": 1.5 }
        }));
        assert_eq!(
            extract_text(&b).as_deref(),
            Some(r#"[locationMessage] {"typeMessage":"locationMessage","locationMessageData":{"latitude":1.5}}"#)
        );
    }

    #[test]
    fn test_summary_reproduces_unmodelled_fields() {
        let b = with_message(json!({
            "typeMessage": "reactionMessage",
            "extendedTextMessageData": { "text": "👍", "quotedMessageId": "BAE5F4" },
            "fileMessageData": { "downloadUrl": "u", "jpegThumbnail": "AAAA" }
        }));
        assert_eq!(
            extract_text(&b).as_deref(),
            Some(concat!(
                r#"[reactionMessage] {"typeMessage":"reactionMessage","#,
                r#""extendedTextMessageData":{"text":"👍","quotedMessageId":"BAE5F4"},"#,
                r#""fileMessageData":{"downloadUrl":"u","jpegThumbnail":"AAAA"}}"#
            ))
        );
    }

    #[test]
    fn test_misshapen_text_section_is_summarized() {
        let b = with_message(json!({
            "typeMessage": "textMessage",
            "textMessageData": "hola"
        }));
        assert_eq!(
            extract_text(&b).as_deref(),
            Some(r#"[textMessage] {"typeMessage":"textMessage","textMessageData":"hola"}"#)
        );
    }

    #[test]
    fn test_untagged_message_is_summarized_as_event() {
        let b = with_message(json!({ "reaction": "👍" }));
        assert_eq!(
            extract_text(&b).as_deref(),
            Some(r#"[evento] {"reaction":"👍"}"#)
        );
    }

    #[test]
    fn test_text_kind_without_text_is_summarized() {
        let b = with_message(json!({ "typeMessage": "textMessage", "textMessageData": {} }));
        let text = extract_text(&b).unwrap();
        assert!(text.starts_with("[textMessage] "));
    }

    #[test]
    fn test_whitespace_text_is_returned_but_not_stored() {
        let b = with_message(json!({
            "typeMessage": "textMessage",
            "textMessageData": { "textMessage": "  " }
        }));
        assert_eq!(extract_text(&b).as_deref(), Some("  "));
        assert_eq!(normalize(&b), Err(NormalizationGap::NoText));

        let b = with_message(json!({
            "typeMessage": "extendedTextMessage",
            "extendedTextMessageData": { "text": "\n" }
        }));
        assert_eq!(extract_text(&b).as_deref(), Some("\n"));
        assert_eq!(normalize(&b), Err(NormalizationGap::NoText));
    }

    #[test]
    fn test_status_section_is_summarized() {
        let b = body(json!({
            "typeWebhook": "outgoingMessageStatus",
            "chatId": "34600000000@c.us",
            "status": "delivered"
        }));
        assert_eq!(extract_text(&b).as_deref(), Some(r#"[status] "delivered""#));
    }

    #[test]
    fn test_nothing_to_extract() {
        let b = body(json!({
            "typeWebhook": "stateInstanceChanged",
            "senderData": { "chatId": "x@c.us" }
        }));
        assert_eq!(extract_text(&b), None);

        let b = body(json!({
            "senderData": { "chatId": "x@c.us" },
            "messageData": {},
            "status": ""
        }));
        assert_eq!(extract_text(&b), None);
        assert_eq!(normalize(&b), Err(NormalizationGap::NoText));
    }

    #[test]
    fn test_summary_truncation() {
        let long = "a".repeat(800);
        let summary = summarize("evento", &long);
        // `"` + 700 chars of the JSON string + `...`
        let expected_json: String = format!("\"{}", "a".repeat(SUMMARY_MAX_CHARS - 1));
        assert_eq!(summary, format!("[evento] {}...", expected_json));

        let payload = summary.strip_prefix("[evento] ").unwrap();
        assert_eq!(payload.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[test]
    fn test_summary_at_limit_is_not_truncated() {
        // 698 chars + two quotes = exactly 700.
        let exact = "b".repeat(SUMMARY_MAX_CHARS - 2);
        let summary = summarize("x", &exact);
        assert!(!summary.ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long = "ñ".repeat(1000);
        let summary = summarize("x", &long);
        let payload = summary.strip_prefix("[x] ").unwrap();
        assert_eq!(payload.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[test]
    fn test_classify_direction() {
        let cases = [
            ("incomingMessageReceived", Direction::Incoming),
            ("outgoingMessageReceived", Direction::Outgoing),
            ("outgoingAPIMessageReceived", Direction::Outgoing),
            ("outgoingMessageStatus", Direction::Service),
            ("stateInstanceChanged", Direction::Service),
            ("", Direction::Service),
        ];
        for (tag, expected) in cases {
            let b = body(json!({ "typeWebhook": tag }));
            assert_eq!(classify_direction(&b), expected, "tag {tag}");
        }
        assert_eq!(classify_direction(&body(json!({}))), Direction::Service);
    }

    #[test]
    fn test_normalize_incoming_text() {
        let b = body(json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": { "chatId": "X" },
            "messageData": {
                "typeMessage": "textMessage",
                "textMessageData": { "textMessage": "hi" }
            }
        }));
        assert_eq!(
            normalize(&b).unwrap(),
            NormalizedMessage {
                chat_id: "X".to_string(),
                text: "hi".to_string(),
                direction: Direction::Incoming,
            }
        );
    }

    #[test]
    fn test_normalize_gaps() {
        let no_chat = body(json!({
            "typeWebhook": "incomingMessageReceived",
            "messageData": { "typeMessage": "textMessage", "textMessageData": { "textMessage": "hi" } }
        }));
        assert_eq!(normalize(&no_chat), Err(NormalizationGap::MissingChatId));

        let long_chat = body(json!({
            "senderData": { "chatId": "9".repeat(65) },
            "status": "read"
        }));
        assert_eq!(normalize(&long_chat), Err(NormalizationGap::InvalidChatId(65)));
    }

    #[test]
    fn test_normalize_clamps_long_text() {
        let b = with_message(json!({
            "typeMessage": "textMessage",
            "textMessageData": { "textMessage": "z".repeat(5000) }
        }));
        let normalized = normalize(&b).unwrap();
        assert_eq!(normalized.text.chars().count(), MAX_MESSAGE_LENGTH);
    }
}
