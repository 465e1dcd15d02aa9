//! Streak calculation over date-stamped activity records.
//!
//! A streak is the number of consecutive calendar days, walking backward from
//! today, that contain at least one record. If nothing is recorded today the
//! walk starts from yesterday instead, so an unfinished day does not break a
//! streak.
//!
//! Records sharing a calendar day count once, and records dated after `today`
//! never contribute.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::Day;

/// Anything stamped with a calendar day.
pub trait Dated {
    fn day(&self) -> Day;
}

impl Dated for Day {
    fn day(&self) -> Day {
        *self
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn day(&self) -> Day {
        (**self).day()
    }
}

/// Current and longest streak for one activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

impl StreakSummary {
    pub fn compute<I>(records: I, today: Day) -> Self
    where
        I: IntoIterator,
        I::Item: Dated,
    {
        let days = distinct_days(records, today);
        Self {
            current: current_from_days(&days, today),
            longest: longest_from_days(&days),
        }
    }
}

/// Count of consecutive days ending today (or yesterday) with activity.
pub fn current_streak<I>(records: I, today: Day) -> u32
where
    I: IntoIterator,
    I::Item: Dated,
{
    current_from_days(&distinct_days(records, today), today)
}

/// Longest run of consecutive active days anywhere up to and including `today`.
pub fn longest_streak<I>(records: I, today: Day) -> u32
where
    I: IntoIterator,
    I::Item: Dated,
{
    longest_from_days(&distinct_days(records, today))
}

/// Deduplicated days, excluding anything after `today`.
fn distinct_days<I>(records: I, today: Day) -> BTreeSet<Day>
where
    I: IntoIterator,
    I::Item: Dated,
{
    records
        .into_iter()
        .map(|r| r.day())
        .filter(|d| *d <= today)
        .collect()
}

fn current_from_days(days: &BTreeSet<Day>, today: Day) -> u32 {
    let anchor = if days.contains(&today) {
        today
    } else {
        today.pred_opt().unwrap_or(today)
    };

    let mut streak: u32 = 0;
    for day in days.iter().rev() {
        if (anchor - *day).num_days() == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

fn longest_from_days(days: &BTreeSet<Day>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<Day> = None;

    for day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(*day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*day);
    }
    longest
}
