//! Daily prayer names, statuses, and validation.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Prayer names
// ---------------------------------------------------------------------------

pub const FAJR: &str = "fajr";
pub const DHUHR: &str = "dhuhr";
pub const ASR: &str = "asr";
pub const MAGHRIB: &str = "maghrib";
pub const ISHA: &str = "isha";

/// The five obligatory daily prayers, in order of the day.
pub const DAILY_PRAYERS: &[&str] = &[FAJR, DHUHR, ASR, MAGHRIB, ISHA];

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Prayed within its time window.
pub const STATUS_ON_TIME: &str = "on_time";
/// Prayed after the preferred time but before the window closed.
pub const STATUS_LATE: &str = "late";
/// Not prayed.
pub const STATUS_MISSED: &str = "missed";
/// Made up after the window closed.
pub const STATUS_QADA: &str = "qada";

pub const VALID_STATUSES: &[&str] = &[STATUS_ON_TIME, STATUS_LATE, STATUS_MISSED, STATUS_QADA];

/// Default status when a prayer is logged without one.
pub const DEFAULT_STATUS: &str = STATUS_ON_TIME;

/// Maximum length of free-form notes.
pub const MAX_NOTES_LENGTH: usize = 2_000;

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if DAILY_PRAYERS.contains(&name) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid prayer '{name}'. Must be one of: {}",
            DAILY_PRAYERS.join(", ")
        )))
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid prayer status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Whether a prayer with this status was actually performed.
pub fn is_performed(status: &str) -> bool {
    status != STATUS_MISSED
}

/// Shared notes check for every activity kind.
pub fn validate_notes(notes: Option<&str>) -> Result<(), CoreError> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LENGTH => Err(CoreError::Validation(format!(
            "Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_daily_prayers_are_valid() {
        for name in DAILY_PRAYERS {
            assert!(validate_name(name).is_ok(), "'{name}' should be valid");
        }
    }

    #[test]
    fn unknown_prayer_is_rejected() {
        assert!(validate_name("tahajjud").is_err());
        assert!(validate_name("Fajr").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn statuses() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        assert!(validate_status("skipped").is_err());
    }

    #[test]
    fn missed_is_not_performed() {
        assert!(!is_performed(STATUS_MISSED));
        assert!(is_performed(STATUS_LATE));
        assert!(is_performed(STATUS_QADA));
    }

    #[test]
    fn notes_length_limit() {
        assert!(validate_notes(None).is_ok());
        assert!(validate_notes(Some(&"a".repeat(MAX_NOTES_LENGTH))).is_ok());
        assert!(validate_notes(Some(&"a".repeat(MAX_NOTES_LENGTH + 1))).is_err());
    }
}
