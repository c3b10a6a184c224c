//! Error types for notification sync.

use database::DatabaseError;
use green_api::GreenApiError;
use thiserror::Error;

/// Errors that abort a drain.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Pulling from the gateway failed for a reason other than an empty queue.
    #[error("{0}")]
    Gateway(#[from] GreenApiError),

    /// Persisting a record failed.
    #[error("{0}")]
    Database(#[from] DatabaseError),
}

impl SyncError {
    /// Structured detail from the upstream error body, when there is one.
    pub fn detail(&self) -> Option<String> {
        match self {
            SyncError::Gateway(err) => err.detail(),
            SyncError::Database(_) => None,
        }
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
