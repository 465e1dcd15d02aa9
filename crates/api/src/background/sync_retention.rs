//! Periodic cleanup of replayed sync records.
//!
//! Records that reached `synced` are only kept for auditing; once older than
//! the configured retention period they are deleted. Runs on a fixed interval
//! using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use noor_db::{Storage, StorageResult};
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the sync retention cleanup loop until `cancel` is triggered.
pub async fn run(storage: Arc<dyn Storage>, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Sync retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Sync retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match purge_once(storage.as_ref(), retention_days).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Sync retention: purged synced records");
                    }
                    Ok(_) => {
                        tracing::debug!("Sync retention: no records to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Sync retention: cleanup failed");
                    }
                }
            }
        }
    }
}

/// Delete synced records last updated more than `retention_days` ago.
///
/// A retention too large to express as a timestamp purges nothing.
pub async fn purge_once(storage: &dyn Storage, retention_days: i64) -> StorageResult<u64> {
    let cutoff = TimeDelta::try_days(retention_days)
        .and_then(|retention| Utc::now().checked_sub_signed(retention));
    let Some(cutoff) = cutoff else {
        tracing::warn!(retention_days, "Sync retention: period out of range, skipping purge");
        return Ok(0);
    };
    storage.purge_synced_before(cutoff).await
}
