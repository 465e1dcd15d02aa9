//! Fasting log entity model and DTOs.

use noor_core::streak::Dated;
use noor_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fastings` table. At most one per user per day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fasting {
    pub id: DbId,
    pub user_id: DbId,
    pub fast_date: Day,
    pub fast_type: String,
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dated for Fasting {
    fn day(&self) -> Day {
        self.fast_date
    }
}

/// DTO for logging a fast.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFasting {
    pub fast_date: Day,
    pub fast_type: String,
    /// Defaults to `true` if omitted.
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

/// DTO for updating a fasting log. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFasting {
    pub fast_date: Option<Day>,
    pub fast_type: Option<String>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}
