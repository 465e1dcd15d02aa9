//! Handlers for the `/achievements` resource, plus the award step run after
//! every new activity record.

use axum::extract::State;
use axum::Json;
use noor_core::achievements::{evaluate, AchievementDef, CATALOG};
use noor_core::types::DbId;
use noor_db::models::achievement::{Achievement, CreateAchievement};
use noor_db::StorageResult;

use super::today;
use crate::activity::ActivitySnapshot;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/achievements
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Achievement>>> {
    Ok(Json(state.storage.list_achievements(auth.user_id).await?))
}

/// GET /api/achievements/catalog
pub async fn catalog() -> Json<&'static [AchievementDef]> {
    Json(CATALOG)
}

/// POST /api/achievements/evaluate
///
/// Re-evaluate the caller's activity and return any newly earned achievements.
pub async fn evaluate_now(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Achievement>>> {
    let awarded = evaluate_and_award(&state, auth.user_id).await?;
    Ok(Json(awarded))
}

/// Award whatever the user has newly earned. Failures are logged, never
/// surfaced: the activity that triggered evaluation has already been saved.
pub(crate) async fn award_achievements(state: &AppState, user_id: DbId) {
    match evaluate_and_award(state, user_id).await {
        Ok(awarded) if !awarded.is_empty() => {
            tracing::info!(user_id, count = awarded.len(), "Achievements awarded");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Achievement evaluation failed");
        }
    }
}

async fn evaluate_and_award(state: &AppState, user_id: DbId) -> StorageResult<Vec<Achievement>> {
    let snapshot = ActivitySnapshot::load(state.storage.as_ref(), user_id).await?;
    let stats = snapshot.stats(today());
    let earned = state.storage.list_achievements(user_id).await?;

    let mut awarded = Vec::new();
    for def in evaluate(&stats, earned.iter().map(|a| a.kind.as_str())) {
        match state
            .storage
            .create_achievement(&CreateAchievement::from((user_id, def)))
            .await
        {
            Ok(achievement) => awarded.push(achievement),
            // A concurrent request awarded it first.
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(user_id, kind = def.kind, "Achievement already awarded");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(awarded)
}
