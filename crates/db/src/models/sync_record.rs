//! Offline sync record model and DTOs.

use noor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sync_records` table: one queued client mutation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub endpoint: String,
    pub method: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for queueing a mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSyncRecord {
    pub endpoint: String,
    pub method: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Request body for a status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSyncStatus {
    pub status: String,
    pub last_error: Option<String>,
}

/// A validated status change as applied by storage.
#[derive(Debug, Clone)]
pub struct SyncTransition {
    /// Status the record must still have for the change to apply.
    pub from_status: String,
    pub status: String,
    /// Replaces the stored error; `None` clears it.
    pub last_error: Option<String>,
    /// Whether to increment `attempts`.
    pub attempted: bool,
}
