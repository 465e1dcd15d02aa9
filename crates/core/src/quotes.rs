//! Inspirational quotes: seed data and quote-of-the-day selection.

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Day;

pub const CATEGORY_QURAN: &str = "quran";
pub const CATEGORY_HADITH: &str = "hadith";

/// `num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

pub const MAX_TEXT_LENGTH: usize = 2_000;
pub const MAX_SOURCE_LENGTH: usize = 200;

/// A quote before it has been stored.
#[derive(Debug, Clone, Copy)]
pub struct SeedQuote {
    pub text: &'static str,
    pub source: &'static str,
    pub category: &'static str,
}

/// Quotes loaded into an empty quote table at startup.
pub const SEED_QUOTES: &[SeedQuote] = &[
    SeedQuote {
        text: "Indeed, with hardship comes ease.",
        source: "Quran 94:6",
        category: CATEGORY_QURAN,
    },
    SeedQuote {
        text: "So remember Me; I will remember you.",
        source: "Quran 2:152",
        category: CATEGORY_QURAN,
    },
    SeedQuote {
        text: "Allah does not burden a soul beyond that it can bear.",
        source: "Quran 2:286",
        category: CATEGORY_QURAN,
    },
    SeedQuote {
        text: "Verily, in the remembrance of Allah do hearts find rest.",
        source: "Quran 13:28",
        category: CATEGORY_QURAN,
    },
    SeedQuote {
        text: "And seek help through patience and prayer.",
        source: "Quran 2:45",
        category: CATEGORY_QURAN,
    },
    SeedQuote {
        text: "Actions are judged by intentions.",
        source: "Sahih al-Bukhari 1",
        category: CATEGORY_HADITH,
    },
    SeedQuote {
        text: "The most beloved deeds to Allah are those done consistently, even if they are small.",
        source: "Sahih al-Bukhari 6464",
        category: CATEGORY_HADITH,
    },
];

/// Index of the quote shown on `day` among `count` quotes.
///
/// Days since 1970-01-01 modulo `count`, so every client gets the same quote
/// for the same calendar day. Dates before the epoch wrap the same way.
pub fn daily_index(day: Day, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let days = i64::from(day.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE;
    Some(days.rem_euclid(count as i64) as usize)
}

pub fn validate_quote(text: &str, source: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Quote text must not be empty".into()));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Quote text exceeds {MAX_TEXT_LENGTH} characters"
        )));
    }
    if source.trim().is_empty() {
        return Err(CoreError::Validation("Quote source must not be empty".into()));
    }
    if source.chars().count() > MAX_SOURCE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Quote source exceeds {MAX_SOURCE_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_quotes_no_index() {
        let day = Day::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(daily_index(day, 0), None);
    }

    #[test]
    fn counts_days_from_unix_epoch() {
        let epoch = Day::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(daily_index(epoch, 7), Some(0));
        assert_eq!(daily_index(Day::from_ymd_opt(1970, 1, 9).unwrap(), 7), Some(1));
        // 2025-01-01 is day 20089.
        assert_eq!(daily_index(Day::from_ymd_opt(2025, 1, 1).unwrap(), 7), Some(20089 % 7));
        assert_eq!(daily_index(Day::from_ymd_opt(1969, 12, 31).unwrap(), 7), Some(6));
    }

    #[test]
    fn same_day_same_index() {
        let day = Day::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(daily_index(day, 7), daily_index(day, 7));
    }

    #[test]
    fn index_advances_daily_and_wraps() {
        let day = Day::from_ymd_opt(2025, 6, 1).unwrap();
        let first = daily_index(day, 3).unwrap();
        let next = daily_index(day.succ_opt().unwrap(), 3).unwrap();
        assert_eq!(next, (first + 1) % 3);
        for offset in 0..10 {
            let d = day + chrono::Duration::days(offset);
            assert!(daily_index(d, 3).unwrap() < 3);
        }
    }

    #[test]
    fn seed_quotes_are_valid() {
        for q in SEED_QUOTES {
            assert!(validate_quote(q.text, q.source).is_ok(), "{}", q.source);
        }
    }

    #[test]
    fn blank_quote_is_rejected() {
        assert!(validate_quote(" ", "Quran 1:1").is_err());
        assert!(validate_quote("Text", "").is_err());
    }
}
