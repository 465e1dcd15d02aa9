//! Group and challenge validation.

use crate::error::CoreError;
use crate::types::Day;

pub const MAX_GROUP_NAME_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

// ---------------------------------------------------------------------------
// Challenge kinds
// ---------------------------------------------------------------------------

/// Progress counts prayers that were performed (not missed).
pub const CHALLENGE_PRAYER: &str = "prayer";
/// Progress counts completed fasts.
pub const CHALLENGE_FASTING: &str = "fasting";
/// Progress counts ayat read.
pub const CHALLENGE_QURAN: &str = "quran";

pub const VALID_CHALLENGE_KINDS: &[&str] = &[CHALLENGE_PRAYER, CHALLENGE_FASTING, CHALLENGE_QURAN];

pub fn validate_group_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Group name", name, MAX_GROUP_NAME_LENGTH)
}

pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(CoreError::Validation(
            format!("Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_challenge_title(title: &str) -> Result<(), CoreError> {
    validate_required_text("Challenge title", title, MAX_TITLE_LENGTH)
}

pub fn validate_challenge_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_CHALLENGE_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid challenge kind '{kind}'. Must be one of: {}",
            VALID_CHALLENGE_KINDS.join(", ")
        )))
    }
}

pub fn validate_target(target: i32) -> Result<(), CoreError> {
    if target > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Challenge target must be positive (got {target})"
        )))
    }
}

pub fn validate_window(start_date: Day, end_date: Day) -> Result<(), CoreError> {
    if end_date < start_date {
        return Err(CoreError::Validation(format!(
            "Challenge end date {end_date} is before start date {start_date}"
        )));
    }
    Ok(())
}

/// Whether `day` falls inside the inclusive challenge window.
pub fn in_window(day: Day, start_date: Day, end_date: Day) -> bool {
    start_date <= day && day <= end_date
}

fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> Day {
        Day::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn group_names() {
        assert!(validate_group_name("Masjid Al-Noor Youth").is_ok());
        assert!(validate_group_name("  ").is_err());
        assert!(validate_group_name(&"g".repeat(101)).is_err());
    }

    #[test]
    fn challenge_kinds() {
        for k in VALID_CHALLENGE_KINDS {
            assert!(validate_challenge_kind(k).is_ok());
        }
        assert!(validate_challenge_kind("steps").is_err());
    }

    #[test]
    fn target_must_be_positive() {
        assert!(validate_target(1).is_ok());
        assert!(validate_target(0).is_err());
        assert!(validate_target(-3).is_err());
    }

    #[test]
    fn window_order() {
        assert!(validate_window(day(3, 1), day(3, 30)).is_ok());
        assert!(validate_window(day(3, 1), day(3, 1)).is_ok());
        assert!(validate_window(day(3, 2), day(3, 1)).is_err());
    }

    #[test]
    fn window_is_inclusive() {
        assert!(in_window(day(3, 1), day(3, 1), day(3, 10)));
        assert!(in_window(day(3, 10), day(3, 1), day(3, 10)));
        assert!(!in_window(day(3, 11), day(3, 1), day(3, 10)));
    }
}
