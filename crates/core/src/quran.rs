//! Quran structure and reading-range validation.

use crate::error::CoreError;

/// Number of surahs in the Quran.
pub const SURAH_COUNT: i32 = 114;

/// Verse count of each surah, indexed by `surah - 1`.
const AYAH_COUNTS: [i32; 114] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53,
    89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12,
    12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26,
    30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

/// Number of verses in `surah` (1-based), or `None` if out of range.
pub fn ayah_count(surah: i32) -> Option<i32> {
    if (1..=SURAH_COUNT).contains(&surah) {
        Some(AYAH_COUNTS[(surah - 1) as usize])
    } else {
        None
    }
}

/// Validate that `start_ayah..=end_ayah` lies inside `surah`.
pub fn validate_range(surah: i32, start_ayah: i32, end_ayah: i32) -> Result<(), CoreError> {
    let count = ayah_count(surah).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid surah {surah}. Must be between 1 and {SURAH_COUNT}"
        ))
    })?;

    if start_ayah < 1 || start_ayah > end_ayah {
        return Err(CoreError::Validation(format!(
            "Invalid ayah range {start_ayah}-{end_ayah}. Start must be at least 1 and not after end"
        )));
    }
    if end_ayah > count {
        return Err(CoreError::Validation(format!(
            "Surah {surah} has {count} ayat; range ends at {end_ayah}"
        )));
    }
    Ok(())
}

/// Number of verses covered by an already validated range.
pub fn ayat_in_range(start_ayah: i32, end_ayah: i32) -> i64 {
    i64::from(end_ayah - start_ayah + 1)
}

/// Optional counters (pages, minutes) must be positive when present.
pub fn validate_positive(field: &str, value: Option<i32>) -> Result<(), CoreError> {
    match value {
        Some(v) if v <= 0 => Err(CoreError::Validation(format!(
            "{field} must be positive (got {v})"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_table_totals_6236() {
        let total: i32 = AYAH_COUNTS.iter().sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn ayah_count_bounds() {
        assert_eq!(ayah_count(1), Some(7));
        assert_eq!(ayah_count(2), Some(286));
        assert_eq!(ayah_count(114), Some(6));
        assert_eq!(ayah_count(0), None);
        assert_eq!(ayah_count(115), None);
    }

    #[test]
    fn whole_surah_is_valid() {
        assert!(validate_range(1, 1, 7).is_ok());
        assert!(validate_range(36, 1, 83).is_ok());
    }

    #[test]
    fn range_past_end_of_surah_is_rejected() {
        let err = validate_range(1, 1, 8).unwrap_err();
        assert!(err.to_string().contains("7 ayat"));
    }

    #[test]
    fn inverted_or_zero_start_is_rejected() {
        assert!(validate_range(2, 10, 5).is_err());
        assert!(validate_range(2, 0, 5).is_err());
    }

    #[test]
    fn unknown_surah_is_rejected() {
        assert!(validate_range(0, 1, 1).is_err());
        assert!(validate_range(200, 1, 1).is_err());
    }

    #[test]
    fn ayat_in_range_is_inclusive() {
        assert_eq!(ayat_in_range(1, 7), 7);
        assert_eq!(ayat_in_range(5, 5), 1);
    }

    #[test]
    fn positive_counters() {
        assert!(validate_positive("pages", None).is_ok());
        assert!(validate_positive("pages", Some(3)).is_ok());
        assert!(validate_positive("pages", Some(0)).is_err());
        assert!(validate_positive("duration_minutes", Some(-5)).is_err());
    }
}
