//! Prayer log entity model and DTOs.

use noor_core::streak::Dated;
use noor_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prayers` table: one of the five daily prayers on one day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prayer {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub prayer_date: Day,
    pub status: String,
    pub in_congregation: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dated for Prayer {
    fn day(&self) -> Day {
        self.prayer_date
    }
}

/// DTO for logging a prayer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrayer {
    pub name: String,
    pub prayer_date: Day,
    /// Defaults to `on_time` if omitted.
    pub status: Option<String>,
    #[serde(default)]
    pub in_congregation: bool,
    pub notes: Option<String>,
}

/// DTO for updating a prayer log. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrayer {
    pub name: Option<String>,
    pub prayer_date: Option<Day>,
    pub status: Option<String>,
    pub in_congregation: Option<bool>,
    pub notes: Option<String>,
}
