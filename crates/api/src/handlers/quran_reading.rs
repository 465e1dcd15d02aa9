//! Handlers for the `/quran-readings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::prayer::validate_notes;
use noor_core::quran::{validate_positive, validate_range};
use noor_core::streak::StreakSummary;
use noor_core::types::DbId;
use noor_db::models::quran::{CreateQuranReading, QuranReading, UpdateQuranReading};
use noor_db::models::DateRange;
use serde::Serialize;

use super::achievement::award_achievements;
use super::{not_found, today};
use crate::activity::ActivitySnapshot;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::DateFilterParams;
use crate::state::AppState;

/// A reading plus the number of ayat it covers.
#[derive(Debug, Serialize)]
pub struct QuranReadingResponse {
    #[serde(flatten)]
    pub reading: QuranReading,
    pub ayah_count: i64,
}

impl From<QuranReading> for QuranReadingResponse {
    fn from(reading: QuranReading) -> Self {
        Self {
            ayah_count: reading.ayat(),
            reading,
        }
    }
}

/// POST /api/quran-readings
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateQuranReading>,
) -> AppResult<(StatusCode, Json<QuranReadingResponse>)> {
    validate_range(input.surah, input.start_ayah, input.end_ayah)?;
    validate_positive("pages", input.pages)?;
    validate_positive("duration_minutes", input.duration_minutes)?;
    validate_notes(input.notes.as_deref())?;

    let reading = state
        .storage
        .create_quran_reading(auth.user_id, &input)
        .await?;
    tracing::debug!(
        user_id = auth.user_id,
        reading_id = reading.id,
        ayat = reading.ayat(),
        "Quran reading logged"
    );

    award_achievements(&state, auth.user_id).await;
    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// GET /api/quran-readings?date=|from=&to=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<DateFilterParams>,
) -> AppResult<Json<Vec<QuranReadingResponse>>> {
    let range = params.into_range()?;
    let readings = state
        .storage
        .list_quran_readings(auth.user_id, range)
        .await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// GET /api/quran-readings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<QuranReadingResponse>> {
    Ok(Json(load_owned(&state, &auth, id).await?.into()))
}

/// PUT /api/quran-readings/{id}
///
/// The merged surah/ayah range is validated as a whole.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateQuranReading>,
) -> AppResult<Json<QuranReadingResponse>> {
    let current = load_owned(&state, &auth, id).await?;
    validate_range(
        input.surah.unwrap_or(current.surah),
        input.start_ayah.unwrap_or(current.start_ayah),
        input.end_ayah.unwrap_or(current.end_ayah),
    )?;
    validate_positive("pages", input.pages)?;
    validate_positive("duration_minutes", input.duration_minutes)?;
    validate_notes(input.notes.as_deref())?;

    let reading = state
        .storage
        .update_quran_reading(id, &input)
        .await?
        .ok_or_else(|| not_found("QuranReading", id))?;
    Ok(Json(reading.into()))
}

/// DELETE /api/quran-readings/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;
    if state.storage.delete_quran_reading(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("QuranReading", id))
    }
}

/// GET /api/quran-readings/streak
pub async fn streak(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StreakSummary>> {
    let snapshot = ActivitySnapshot {
        readings: state
            .storage
            .list_quran_readings(auth.user_id, DateRange::all())
            .await?,
        ..Default::default()
    };
    Ok(Json(snapshot.reading_streak(today())))
}

async fn load_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<QuranReading> {
    let reading = state
        .storage
        .find_quran_reading(id)
        .await?
        .ok_or_else(|| not_found("QuranReading", id))?;
    auth.ensure_owns(reading.user_id, "QuranReading")?;
    Ok(reading)
}
