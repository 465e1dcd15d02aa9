//! A user's full activity history and the aggregates derived from it.
//!
//! Shared by the streak, statistics and achievement endpoints so they all
//! count the same things the same way.

use noor_core::achievements::ActivityStats;
use noor_core::prayer::{is_performed, DAILY_PRAYERS, STATUS_ON_TIME};
use noor_core::streak::StreakSummary;
use noor_core::types::{Day, DbId};
use noor_db::models::fasting::Fasting;
use noor_db::models::prayer::Prayer;
use noor_db::models::quran::QuranReading;
use noor_db::models::DateRange;
use noor_db::{Storage, StorageResult};
use serde::Serialize;

/// Every activity record of one user.
#[derive(Debug, Clone, Default)]
pub struct ActivitySnapshot {
    pub prayers: Vec<Prayer>,
    pub fastings: Vec<Fasting>,
    pub readings: Vec<QuranReading>,
    pub groups_joined: i64,
}

impl ActivitySnapshot {
    pub async fn load(storage: &dyn Storage, user_id: DbId) -> StorageResult<Self> {
        let prayers = storage.list_prayers(user_id, DateRange::all()).await?;
        let fastings = storage.list_fastings(user_id, DateRange::all()).await?;
        let readings = storage.list_quran_readings(user_id, DateRange::all()).await?;
        let groups_joined = storage.list_user_memberships(user_id).await?.len() as i64;
        Ok(Self {
            prayers,
            fastings,
            readings,
            groups_joined,
        })
    }

    /// Prayer streak: days with at least one prayer that was not missed.
    pub fn prayer_streak(&self, today: Day) -> StreakSummary {
        StreakSummary::compute(self.performed_prayers(), today)
    }

    /// Fasting streak: days with a completed fast.
    pub fn fasting_streak(&self, today: Day) -> StreakSummary {
        StreakSummary::compute(self.fastings.iter().filter(|f| f.completed), today)
    }

    pub fn reading_streak(&self, today: Day) -> StreakSummary {
        StreakSummary::compute(&self.readings, today)
    }

    pub fn ayat_read(&self) -> i64 {
        self.readings.iter().map(QuranReading::ayat).sum()
    }

    pub fn pages_read(&self) -> i64 {
        self.readings
            .iter()
            .filter_map(|r| r.pages)
            .map(i64::from)
            .sum()
    }

    /// Counters consumed by the achievement rules.
    pub fn stats(&self, today: Day) -> ActivityStats {
        ActivityStats {
            prayers_logged: self.prayers.len() as i64,
            prayers_on_time: self
                .prayers
                .iter()
                .filter(|p| p.status == STATUS_ON_TIME)
                .count() as i64,
            congregational_prayers: self
                .performed_prayers()
                .filter(|p| p.in_congregation)
                .count() as i64,
            longest_prayer_streak: self.prayer_streak(today).longest,
            completed_fasts: self.fastings.iter().filter(|f| f.completed).count() as i64,
            quran_readings: self.readings.len() as i64,
            ayat_read: self.ayat_read(),
            longest_reading_streak: self.reading_streak(today).longest,
            groups_joined: self.groups_joined,
        }
    }

    fn performed_prayers(&self) -> impl Iterator<Item = &Prayer> {
        self.prayers.iter().filter(|p| is_performed(&p.status))
    }
}

// ---------------------------------------------------------------------------
// Daily prayer completion
// ---------------------------------------------------------------------------

/// One of the five daily prayers on a given day.
#[derive(Debug, Serialize)]
pub struct DailyPrayerEntry {
    pub name: &'static str,
    /// `None` when the prayer has not been recorded.
    pub prayer_id: Option<DbId>,
    pub status: Option<String>,
}

/// Completion of the five daily prayers for one day.
#[derive(Debug, Serialize)]
pub struct DailyPrayerSummary {
    pub date: Day,
    pub prayers: Vec<DailyPrayerEntry>,
    /// Prayers with any record.
    pub recorded: usize,
    /// Prayers recorded with a status other than `missed`.
    pub performed: usize,
    pub total: usize,
}

impl DailyPrayerSummary {
    /// Build the summary for `date` from any set of prayers (other days are ignored).
    pub fn build<'a>(date: Day, prayers: impl IntoIterator<Item = &'a Prayer>) -> Self {
        let of_day: Vec<&Prayer> = prayers
            .into_iter()
            .filter(|p| p.prayer_date == date)
            .collect();

        let entries: Vec<DailyPrayerEntry> = DAILY_PRAYERS
            .iter()
            .map(|&name| {
                let found = of_day.iter().find(|p| p.name == name);
                DailyPrayerEntry {
                    name,
                    prayer_id: found.map(|p| p.id),
                    status: found.map(|p| p.status.clone()),
                }
            })
            .collect();

        let recorded = entries.iter().filter(|e| e.status.is_some()).count();
        let performed = entries
            .iter()
            .filter(|e| e.status.as_deref().is_some_and(is_performed))
            .count();

        Self {
            date,
            prayers: entries,
            recorded,
            performed,
            total: DAILY_PRAYERS.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn prayer(id: DbId, name: &str, date: Day, status: &str) -> Prayer {
        Prayer {
            id,
            user_id: 1,
            name: name.to_string(),
            prayer_date: date,
            status: status.to_string(),
            in_congregation: id % 2 == 0,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn missed_prayers_do_not_extend_the_streak() {
        let snapshot = ActivitySnapshot {
            prayers: vec![
                prayer(1, "fajr", day(10), "on_time"),
                prayer(2, "fajr", day(9), "missed"),
                prayer(3, "isha", day(8), "late"),
            ],
            ..Default::default()
        };
        let streak = snapshot.prayer_streak(day(10));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
    }

    #[test]
    fn stats_count_each_metric() {
        let snapshot = ActivitySnapshot {
            prayers: vec![
                prayer(1, "fajr", day(10), "on_time"),
                prayer(2, "dhuhr", day(10), "on_time"),
                prayer(4, "asr", day(10), "missed"),
            ],
            groups_joined: 2,
            ..Default::default()
        };
        let stats = snapshot.stats(day(10));
        assert_eq!(stats.prayers_logged, 3);
        assert_eq!(stats.prayers_on_time, 2);
        // Id 4 is in congregation but missed.
        assert_eq!(stats.congregational_prayers, 1);
        assert_eq!(stats.longest_prayer_streak, 1);
        assert_eq!(stats.groups_joined, 2);
        assert_eq!(stats.ayat_read, 0);
    }

    #[test]
    fn daily_summary_lists_all_five_prayers() {
        let prayers = vec![
            prayer(1, "fajr", day(10), "on_time"),
            prayer(2, "maghrib", day(10), "missed"),
            prayer(3, "isha", day(9), "on_time"),
        ];
        let summary = DailyPrayerSummary::build(day(10), &prayers);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.performed, 1);
        assert_eq!(summary.prayers[0].name, "fajr");
        assert_eq!(summary.prayers[0].prayer_id, Some(1));
        assert!(summary.prayers[4].status.is_none());
    }
}
