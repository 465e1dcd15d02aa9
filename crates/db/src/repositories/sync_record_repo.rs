//! Repository for the `sync_records` table.

use noor_core::sync::STATUS_SYNCED;
use noor_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::sync_record::{CreateSyncRecord, SyncRecord, SyncTransition};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, endpoint, method, payload, status, attempts, last_error, \
                       created_at, updated_at";

/// Provides queue operations for offline sync records.
pub struct SyncRecordRepo;

impl SyncRecordRepo {
    /// Queue a mutation. New records are `pending` with zero attempts.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSyncRecord,
    ) -> Result<SyncRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_records (user_id, endpoint, method, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(user_id)
            .bind(&input.endpoint)
            .bind(&input.method)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SyncRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sync_records WHERE id = $1");
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's queue in creation order, optionally filtered by status.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<SyncRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sync_records
             WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Apply an already-validated status change, guarded on the status it was
    /// validated against. No row is returned if the status has moved on.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        transition: &SyncTransition,
    ) -> Result<Option<SyncRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE sync_records SET
                status = $2,
                last_error = $3,
                attempts = attempts + CASE WHEN $4 THEN 1 ELSE 0 END
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(id)
            .bind(&transition.status)
            .bind(&transition.last_error)
            .bind(transition.attempted)
            .bind(&transition.from_status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sync_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete `synced` records last touched before `cutoff`.
    pub async fn purge_synced_before(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sync_records WHERE status = $1 AND updated_at < $2")
            .bind(STATUS_SYNCED)
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
