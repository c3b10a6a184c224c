//! Green-API gateway client library.
//!
//! This crate provides a Rust client for a Green-API WhatsApp instance over
//! HTTP. It supports:
//!
//! - Sending text messages
//! - Pulling and acknowledging queued notifications
//! - Decoding webhook and notification bodies
//!
//! # Example
//!
//! ```no_run
//! use green_api::{Gateway, GreenClient, GreenConfig};
//!
//! # async fn example() -> Result<(), green_api::GreenApiError> {
//! let config = GreenConfig::with_credentials("https://api.green-api.com", "1101000001", "token");
//! let client = GreenClient::new(config)?;
//!
//! // Send a message
//! client.send_message("34600000000@c.us", "Hola!").await?;
//!
//! // Drain one queued notification
//! if let Some(notification) = client.receive_notification().await? {
//!     println!("{:?}", notification.body);
//!     if let Some(receipt_id) = notification.receipt_id {
//!         client.delete_notification(receipt_id).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::GreenClient;
pub use config::{GreenConfig, ParseTimeoutError, Timeout, DEFAULT_API_URL};
pub use error::GreenApiError;
pub use gateway::Gateway;
pub use reqwest::Method;
pub use types::*;
