//! Handlers for the `/sync` resource: the offline mutation queue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::error::CoreError;
use noor_core::sync::{
    counts_as_attempt, normalize_method, validate_endpoint, validate_status, validate_transition,
    STATUS_FAILED,
};
use noor_core::types::DbId;
use noor_db::models::sync_record::{
    CreateSyncRecord, SyncRecord, SyncTransition, UpdateSyncStatus,
};

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilterParams;
use crate::state::AppState;

/// POST /api/sync
///
/// Queue a mutation. The method is stored uppercase.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateSyncRecord>,
) -> AppResult<(StatusCode, Json<SyncRecord>)> {
    validate_endpoint(&input.endpoint)?;
    let input = CreateSyncRecord {
        method: normalize_method(&input.method)?,
        ..input
    };

    let record = state.storage.create_sync_record(auth.user_id, &input).await?;
    tracing::debug!(
        user_id = auth.user_id,
        sync_id = record.id,
        method = %record.method,
        endpoint = %record.endpoint,
        "Mutation queued",
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/sync?status=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<Vec<SyncRecord>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }
    let records = state
        .storage
        .list_sync_records(auth.user_id, params.status.as_deref())
        .await?;
    Ok(Json(records))
}

/// PUT /api/sync/{id}
///
/// Move a record through its status machine. Disallowed moves are 409, as is
/// a move that loses a race with another update of the same record.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateSyncStatus>,
) -> AppResult<Json<SyncRecord>> {
    let current = load_owned(&state, &auth, id).await?;
    validate_transition(&current.status, &input.status, input.last_error.as_deref())?;

    let transition = SyncTransition {
        from_status: current.status.clone(),
        last_error: if input.status == STATUS_FAILED {
            input.last_error.map(|e| e.trim().to_string())
        } else {
            None
        },
        attempted: counts_as_attempt(&input.status),
        status: input.status,
    };
    let Some(record) = state.storage.transition_sync_record(id, &transition).await? else {
        return Err(match state.storage.find_sync_record(id).await? {
            Some(_) => AppError::Core(CoreError::Conflict(
                "Sync record was updated concurrently; reload and retry".into(),
            )),
            None => not_found("SyncRecord", id),
        });
    };

    tracing::info!(
        user_id = auth.user_id,
        sync_id = id,
        from = %current.status,
        to = %record.status,
        attempts = record.attempts,
        "Sync record transitioned",
    );
    Ok(Json(record))
}

/// DELETE /api/sync/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;
    if state.storage.delete_sync_record(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("SyncRecord", id))
    }
}

async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<SyncRecord> {
    let record = state
        .storage
        .find_sync_record(id)
        .await?
        .ok_or_else(|| not_found("SyncRecord", id))?;
    auth.ensure_owns(record.user_id, "SyncRecord")?;
    Ok(record)
}
