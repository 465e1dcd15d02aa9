//! Handlers for the `/prayers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::prayer::{validate_name, validate_notes, validate_status};
use noor_core::streak::StreakSummary;
use noor_core::types::DbId;
use noor_db::models::prayer::{CreatePrayer, Prayer, UpdatePrayer};
use noor_db::models::DateRange;

use super::achievement::award_achievements;
use super::{not_found, today};
use crate::activity::{ActivitySnapshot, DailyPrayerSummary};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::{DateFilterParams, DayParams};
use crate::state::AppState;

/// POST /api/prayers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreatePrayer>,
) -> AppResult<(StatusCode, Json<Prayer>)> {
    validate_name(&input.name)?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    validate_notes(input.notes.as_deref())?;

    let prayer = state.storage.create_prayer(auth.user_id, &input).await?;
    tracing::debug!(user_id = auth.user_id, prayer_id = prayer.id, "Prayer logged");

    award_achievements(&state, auth.user_id).await;
    Ok((StatusCode::CREATED, Json(prayer)))
}

/// GET /api/prayers?date=|from=&to=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<DateFilterParams>,
) -> AppResult<Json<Vec<Prayer>>> {
    let range = params.into_range()?;
    let prayers = state.storage.list_prayers(auth.user_id, range).await?;
    Ok(Json(prayers))
}

/// GET /api/prayers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Prayer>> {
    let prayer = load_owned(&state, &auth, id).await?;
    Ok(Json(prayer))
}

/// PUT /api/prayers/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdatePrayer>,
) -> AppResult<Json<Prayer>> {
    load_owned(&state, &auth, id).await?;
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    validate_notes(input.notes.as_deref())?;

    let prayer = state
        .storage
        .update_prayer(id, &input)
        .await?
        .ok_or_else(|| not_found("Prayer", id))?;
    Ok(Json(prayer))
}

/// DELETE /api/prayers/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;
    if state.storage.delete_prayer(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Prayer", id))
    }
}

/// GET /api/prayers/streak
///
/// Days in a row with at least one prayer that was not missed.
pub async fn streak(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StreakSummary>> {
    let snapshot = ActivitySnapshot {
        prayers: state
            .storage
            .list_prayers(auth.user_id, DateRange::all())
            .await?,
        ..Default::default()
    };
    Ok(Json(snapshot.prayer_streak(today())))
}

/// GET /api/prayers/daily?date=
///
/// Completion of the five daily prayers for one day (default today).
pub async fn daily(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<DayParams>,
) -> AppResult<Json<DailyPrayerSummary>> {
    let date = params.date.unwrap_or_else(today);
    let prayers = state
        .storage
        .list_prayers(auth.user_id, DateRange::day(date))
        .await?;
    Ok(Json(DailyPrayerSummary::build(date, &prayers)))
}

/// Fetch a prayer, rejecting with 404 if absent and 403 if owned by someone else.
async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Prayer> {
    let prayer = state
        .storage
        .find_prayer(id)
        .await?
        .ok_or_else(|| not_found("Prayer", id))?;
    auth.ensure_owns(prayer.user_id, "Prayer")?;
    Ok(prayer)
}
