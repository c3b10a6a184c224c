//! Draining the gateway's notification queue into the message log.

use green_api::{Gateway, GreenApiError, Notification};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::normalize::NormalizationGap;
use crate::record::{store_notification, StoreOutcome};

/// Default bound on pulls per drain.
pub const DEFAULT_MAX_PULL: usize = 10;

/// Counters for one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Pull requests made, including the one that found the queue empty.
    pub attempts: usize,
    /// Records committed.
    pub stored: usize,
    /// Notifications that produced no record.
    pub discarded: usize,
    /// Notifications whose deletion failed; the gateway may redeliver them.
    pub unacknowledged: usize,
}

/// Pull, store and acknowledge up to `max_iterations` notifications.
///
/// A 404 or an empty result ends the drain normally. Any other pull error,
/// or a failure to persist, aborts it; records already committed stay.
/// Failed acknowledgments are logged and counted but never abort the loop.
pub async fn drain<G>(gateway: &G, pool: &SqlitePool, max_iterations: usize) -> Result<SyncReport>
where
    G: Gateway + ?Sized,
{
    let max_iterations = max_iterations.max(1);
    let mut report = SyncReport::default();

    while report.attempts < max_iterations {
        report.attempts += 1;

        let notification = match gateway.receive_notification().await {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                debug!(attempt = report.attempts, "Notification queue returned nothing");
                break;
            }
            Err(err) if err.is_not_found() => {
                debug!(attempt = report.attempts, "Notification queue is empty");
                break;
            }
            Err(err) => {
                warn!(
                    attempt = report.attempts,
                    stored = report.stored,
                    error = %err,
                    "Pulling notification failed"
                );
                return Err(err.into());
            }
        };

        match process_notification(pool, &notification).await? {
            StoreOutcome::Stored(_) => report.stored += 1,
            StoreOutcome::Discarded(_) => report.discarded += 1,
        }

        if let Some(receipt_id) = notification.receipt_id {
            if let Err(err) = acknowledge(gateway, receipt_id).await {
                report.unacknowledged += 1;
                warn!(
                    receipt_id,
                    error = %err,
                    "Failed to delete notification; it may be delivered again"
                );
            }
        }
    }

    info!(
        attempts = report.attempts,
        stored = report.stored,
        discarded = report.discarded,
        unacknowledged = report.unacknowledged,
        "Notification drain complete"
    );

    Ok(report)
}

async fn process_notification(
    pool: &SqlitePool,
    notification: &Notification,
) -> Result<StoreOutcome> {
    let outcome = match notification.parse_body() {
        Ok(body) => store_notification(pool, &body).await?,
        Err(err) => {
            warn!(
                receipt_id = ?notification.receipt_id,
                error = %err,
                "Notification body could not be decoded"
            );
            StoreOutcome::Discarded(NormalizationGap::NoText)
        }
    };

    outcome.log("poll");
    Ok(outcome)
}

/// Delete a processed notification from the gateway queue.
pub async fn acknowledge<G>(gateway: &G, receipt_id: u64) -> std::result::Result<(), GreenApiError>
where
    G: Gateway + ?Sized,
{
    gateway.delete_notification(receipt_id).await
}
