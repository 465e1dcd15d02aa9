//! Handler for the `/stats` resource.

use axum::extract::State;
use axum::Json;
use noor_core::streak::StreakSummary;
use serde::Serialize;

use super::today;
use crate::activity::{ActivitySnapshot, DailyPrayerSummary};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Totals {
    pub prayers_logged: i64,
    pub prayers_on_time: i64,
    pub congregational_prayers: i64,
    pub completed_fasts: i64,
    pub quran_readings: i64,
    pub ayat_read: i64,
    pub pages_read: i64,
    pub groups_joined: i64,
}

#[derive(Debug, Serialize)]
pub struct Streaks {
    pub prayer: StreakSummary,
    pub fasting: StreakSummary,
    pub quran: StreakSummary,
}

/// Dashboard summary of one user's practice.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub totals: Totals,
    pub streaks: Streaks,
    pub achievements_earned: usize,
    pub today: DailyPrayerSummary,
}

/// GET /api/stats/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StatsSummary>> {
    let snapshot = ActivitySnapshot::load(state.storage.as_ref(), auth.user_id).await?;
    let achievements = state.storage.list_achievements(auth.user_id).await?;
    let day = today();
    let stats = snapshot.stats(day);

    Ok(Json(StatsSummary {
        totals: Totals {
            prayers_logged: stats.prayers_logged,
            prayers_on_time: stats.prayers_on_time,
            congregational_prayers: stats.congregational_prayers,
            completed_fasts: stats.completed_fasts,
            quran_readings: stats.quran_readings,
            ayat_read: stats.ayat_read,
            pages_read: snapshot.pages_read(),
            groups_joined: stats.groups_joined,
        },
        streaks: Streaks {
            prayer: snapshot.prayer_streak(day),
            fasting: snapshot.fasting_streak(day),
            quran: snapshot.reading_streak(day),
        },
        achievements_earned: achievements.len(),
        today: DailyPrayerSummary::build(day, &snapshot.prayers),
    }))
}
