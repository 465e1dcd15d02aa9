//! Handlers for the `/fastings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::fasting::validate_type;
use noor_core::prayer::validate_notes;
use noor_core::streak::StreakSummary;
use noor_core::types::DbId;
use noor_db::models::fasting::{CreateFasting, Fasting, UpdateFasting};
use noor_db::models::DateRange;

use super::achievement::award_achievements;
use super::{not_found, today};
use crate::activity::ActivitySnapshot;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::DateFilterParams;
use crate::state::AppState;

/// POST /api/fastings
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateFasting>,
) -> AppResult<(StatusCode, Json<Fasting>)> {
    validate_type(&input.fast_type)?;
    validate_notes(input.notes.as_deref())?;

    let fasting = state.storage.create_fasting(auth.user_id, &input).await?;
    tracing::debug!(user_id = auth.user_id, fasting_id = fasting.id, "Fast logged");

    award_achievements(&state, auth.user_id).await;
    Ok((StatusCode::CREATED, Json(fasting)))
}

/// GET /api/fastings?date=|from=&to=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<DateFilterParams>,
) -> AppResult<Json<Vec<Fasting>>> {
    let range = params.into_range()?;
    Ok(Json(state.storage.list_fastings(auth.user_id, range).await?))
}

/// GET /api/fastings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fasting>> {
    Ok(Json(load_owned(&state, &auth, id).await?))
}

/// PUT /api/fastings/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateFasting>,
) -> AppResult<Json<Fasting>> {
    load_owned(&state, &auth, id).await?;
    if let Some(fast_type) = &input.fast_type {
        validate_type(fast_type)?;
    }
    validate_notes(input.notes.as_deref())?;

    let fasting = state
        .storage
        .update_fasting(id, &input)
        .await?
        .ok_or_else(|| not_found("Fasting", id))?;
    Ok(Json(fasting))
}

/// DELETE /api/fastings/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;
    if state.storage.delete_fasting(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Fasting", id))
    }
}

/// GET /api/fastings/streak
///
/// Days in a row with a completed fast.
pub async fn streak(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StreakSummary>> {
    let snapshot = ActivitySnapshot {
        fastings: state
            .storage
            .list_fastings(auth.user_id, DateRange::all())
            .await?,
        ..Default::default()
    };
    Ok(Json(snapshot.fasting_streak(today())))
}

async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Fasting> {
    let fasting = state
        .storage
        .find_fasting(id)
        .await?
        .ok_or_else(|| not_found("Fasting", id))?;
    auth.ensure_owns(fasting.user_id, "Fasting")?;
    Ok(fasting)
}
