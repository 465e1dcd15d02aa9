//! Quran reading entity model and DTOs.

use noor_core::streak::Dated;
use noor_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quran_readings` table: a contiguous range within one surah.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuranReading {
    pub id: DbId,
    pub user_id: DbId,
    pub reading_date: Day,
    pub surah: i32,
    pub start_ayah: i32,
    pub end_ayah: i32,
    pub pages: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QuranReading {
    /// Number of ayat covered by this reading.
    pub fn ayat(&self) -> i64 {
        noor_core::quran::ayat_in_range(self.start_ayah, self.end_ayah)
    }
}

impl Dated for QuranReading {
    fn day(&self) -> Day {
        self.reading_date
    }
}

/// DTO for logging a reading.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuranReading {
    pub reading_date: Day,
    pub surah: i32,
    pub start_ayah: i32,
    pub end_ayah: i32,
    pub pages: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for updating a reading. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuranReading {
    pub reading_date: Option<Day>,
    pub surah: Option<i32>,
    pub start_ayah: Option<i32>,
    pub end_ayah: Option<i32>,
    pub pages: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}
