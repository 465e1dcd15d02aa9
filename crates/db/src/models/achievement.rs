//! Earned achievement model.

use noor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievements` table. Unique per (user, kind).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub earned_at: Timestamp,
}

/// DTO for awarding an achievement.
#[derive(Debug, Clone)]
pub struct CreateAchievement {
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub description: String,
}

impl From<(DbId, &noor_core::achievements::AchievementDef)> for CreateAchievement {
    fn from((user_id, def): (DbId, &noor_core::achievements::AchievementDef)) -> Self {
        Self {
            user_id,
            kind: def.kind.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
        }
    }
}
