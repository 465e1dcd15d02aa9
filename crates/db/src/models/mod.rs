//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial merges

pub mod achievement;
pub mod challenge;
pub mod fasting;
pub mod group;
pub mod prayer;
pub mod quote;
pub mod quran;
pub mod sync_record;
pub mod user;

use noor_core::types::Day;
use serde::Deserialize;

/// Inclusive date filter for activity listings. Missing bounds are open.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRange {
    pub from: Option<Day>,
    pub to: Option<Day>,
}

impl DateRange {
    /// No bounds: every record matches.
    pub fn all() -> Self {
        Self::default()
    }

    /// Exactly one day.
    pub fn day(day: Day) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
        }
    }

    pub fn between(from: Day, to: Day) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, day: Day) -> bool {
        self.from.map_or(true, |f| day >= f) && self.to.map_or(true, |t| day <= t)
    }
}
