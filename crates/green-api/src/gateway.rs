//! The `Gateway` trait: the seam between callers and the HTTP client.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::GreenApiError;
use crate::types::{Notification, SendMessageParams, SendMessageResponse};

/// Something that can make authenticated calls to a Green-API instance.
///
/// Only [`Gateway::call`] must be implemented; the endpoint helpers are
/// expressed in terms of it so test doubles only have to script raw JSON.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Call `endpoint` with `method`.
    ///
    /// `data` is sent as a JSON body for POST, PUT and PATCH, and as query
    /// parameters otherwise. An empty response body yields `Value::Null`.
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&Value>,
    ) -> Result<Value, GreenApiError>;

    /// Send a text message to a chat.
    async fn send_message(
        &self,
        chat_id: &str,
        message: &str,
    ) -> Result<SendMessageResponse, GreenApiError> {
        let params = serde_json::to_value(SendMessageParams::text(chat_id, message))?;
        let value = self.call(Method::POST, "sendMessage", Some(&params)).await?;
        if value.is_null() {
            return Ok(SendMessageResponse::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Pull the next queued notification.
    ///
    /// Returns `Ok(None)` when the gateway answers with an empty result.
    /// A 404 is returned as an error; callers decide what it means.
    async fn receive_notification(&self) -> Result<Option<Notification>, GreenApiError> {
        let value = self.call(Method::GET, "receiveNotification", None).await?;
        if is_empty_result(&value) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Acknowledge (delete) a polled notification.
    async fn delete_notification(&self, receipt_id: u64) -> Result<(), GreenApiError> {
        let endpoint = format!(
            "deleteNotification/{}",
            urlencoding::encode(&receipt_id.to_string())
        );
        self.call(Method::DELETE, &endpoint, None).await?;
        Ok(())
    }
}

/// Null or an empty object.
pub(crate) fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
