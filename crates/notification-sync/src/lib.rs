//! Notification sync for the Green-API bridge.
//!
//! This crate turns gateway notification bodies into message-log records and
//! drains the gateway's polling queue:
//!
//! - [`normalize`]: text extraction and direction classification
//! - [`record`]: the single path from a body to a committed record
//! - [`drain`]: bounded pull / store / acknowledge loop
//!
//! # Example
//!
//! ```no_run
//! use database::Database;
//! use green_api::{GreenClient, GreenConfig};
//! use notification_sync::drain;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:green_bridge.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let client = GreenClient::new(GreenConfig::with_credentials(
//!     "https://api.green-api.com",
//!     "1101000001",
//!     "token",
//! ))?;
//!
//! let report = drain(&client, db.pool(), 10).await?;
//! println!("{} new messages", report.stored);
//! # Ok(())
//! # }
//! ```

pub mod drain;
pub mod error;
pub mod normalize;
pub mod record;

pub use drain::{acknowledge, drain, SyncReport, DEFAULT_MAX_PULL};
pub use error::{Result, SyncError};
pub use normalize::{
    classify_direction, extract_text, normalize, MessageKind, NormalizationGap,
    NormalizedMessage,
};
pub use record::{store_notification, StoreOutcome};
