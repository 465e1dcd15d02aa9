//! Achievement catalog and evaluation.
//!
//! Each achievement is a threshold on one [`Metric`] of a user's
//! [`ActivityStats`]. Evaluation is pure: the caller gathers stats, passes the
//! kinds already earned, and persists whatever comes back.

use serde::Serialize;

/// Aggregated activity counters for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub prayers_logged: i64,
    pub prayers_on_time: i64,
    pub congregational_prayers: i64,
    pub longest_prayer_streak: u32,
    pub completed_fasts: i64,
    pub quran_readings: i64,
    pub ayat_read: i64,
    pub longest_reading_streak: u32,
    pub groups_joined: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PrayersLogged,
    PrayersOnTime,
    CongregationalPrayers,
    LongestPrayerStreak,
    CompletedFasts,
    QuranReadings,
    AyatRead,
    LongestReadingStreak,
    GroupsJoined,
}

impl Metric {
    pub fn value(self, stats: &ActivityStats) -> i64 {
        match self {
            Metric::PrayersLogged => stats.prayers_logged,
            Metric::PrayersOnTime => stats.prayers_on_time,
            Metric::CongregationalPrayers => stats.congregational_prayers,
            Metric::LongestPrayerStreak => i64::from(stats.longest_prayer_streak),
            Metric::CompletedFasts => stats.completed_fasts,
            Metric::QuranReadings => stats.quran_readings,
            Metric::AyatRead => stats.ayat_read,
            Metric::LongestReadingStreak => i64::from(stats.longest_reading_streak),
            Metric::GroupsJoined => stats.groups_joined,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDef {
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub threshold: i64,
}

impl AchievementDef {
    pub fn is_met(&self, stats: &ActivityStats) -> bool {
        self.metric.value(stats) >= self.threshold
    }
}

const fn def(
    kind: &'static str,
    title: &'static str,
    description: &'static str,
    metric: Metric,
    threshold: i64,
) -> AchievementDef {
    AchievementDef {
        kind,
        title,
        description,
        metric,
        threshold,
    }
}

pub const CATALOG: &[AchievementDef] = &[
    def("first_prayer", "First Step", "Logged your first prayer", Metric::PrayersLogged, 1),
    def(
        "prayers_on_time_100",
        "Punctual Worshipper",
        "Prayed 100 prayers on time",
        Metric::PrayersOnTime,
        100,
    ),
    def(
        "congregation_40",
        "Pillar of the Masjid",
        "Prayed 40 prayers in congregation",
        Metric::CongregationalPrayers,
        40,
    ),
    def(
        "prayer_streak_7",
        "Steadfast Week",
        "Prayed on 7 consecutive days",
        Metric::LongestPrayerStreak,
        7,
    ),
    def("first_fast", "First Fast", "Completed your first fast", Metric::CompletedFasts, 1),
    def("fasts_10", "Patient Faster", "Completed 10 fasts", Metric::CompletedFasts, 10),
    def(
        "first_reading",
        "Opening",
        "Logged your first Quran reading",
        Metric::QuranReadings,
        1,
    ),
    def(
        "reading_streak_7",
        "Weekly Reciter",
        "Read Quran on 7 consecutive days",
        Metric::LongestReadingStreak,
        7,
    ),
    def(
        "reading_streak_30",
        "Month of Light",
        "Read Quran on 30 consecutive days",
        Metric::LongestReadingStreak,
        30,
    ),
    def("ayat_1000", "Thousand Verses", "Read 1000 ayat", Metric::AyatRead, 1000),
    def(
        "khatm",
        "Khatm",
        "Read as many ayat as the whole Quran",
        Metric::AyatRead,
        6236,
    ),
    def("community", "Community", "Joined a group", Metric::GroupsJoined, 1),
];

/// Look up a catalog entry by kind.
pub fn find(kind: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|d| d.kind == kind)
}

/// Catalog entries whose threshold is met and whose kind is not yet earned.
pub fn evaluate<'a, I>(stats: &ActivityStats, earned: I) -> Vec<&'static AchievementDef>
where
    I: IntoIterator<Item = &'a str>,
{
    let earned: Vec<&str> = earned.into_iter().collect();
    CATALOG
        .iter()
        .filter(|d| !earned.contains(&d.kind))
        .filter(|d| d.is_met(stats))
        .collect()
}
