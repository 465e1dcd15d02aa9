//! Offline sync records: queued mutations replayed once connectivity returns.
//!
//! A record starts `pending`. Replay moves it to `synced` (terminal) or
//! `failed`; a failed record may be re-queued or marked synced later.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SYNCED: &str = "synced";
pub const STATUS_FAILED: &str = "failed";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_SYNCED, STATUS_FAILED];

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// HTTP methods that mutate state and therefore can be queued.
pub const VALID_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

/// Queued endpoints must target this API.
pub const ENDPOINT_PREFIX: &str = "/api/";

pub const MAX_ENDPOINT_LENGTH: usize = 512;

/// Returns the statuses reachable from `from`.
///
/// - `pending` -> `synced`, `failed`
/// - `failed`  -> `pending`, `synced`
/// - `synced`  -> (terminal)
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_PENDING => &[STATUS_SYNCED, STATUS_FAILED],
        STATUS_FAILED => &[STATUS_PENDING, STATUS_SYNCED],
        _ => &[],
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid sync status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a status change. Moving to `failed` requires an error message.
pub fn validate_transition(
    current: &str,
    next: &str,
    last_error: Option<&str>,
) -> Result<(), CoreError> {
    validate_status(next)?;
    if !valid_transitions(current).contains(&next) {
        return Err(CoreError::Conflict(format!(
            "Cannot move sync record from '{current}' to '{next}'"
        )));
    }
    if next == STATUS_FAILED && last_error.map_or(true, |e| e.trim().is_empty()) {
        return Err(CoreError::Validation(
            "A failed sync record requires last_error".into(),
        ));
    }
    Ok(())
}

/// Whether moving to `next` records a replay attempt.
pub fn counts_as_attempt(next: &str) -> bool {
    next == STATUS_SYNCED || next == STATUS_FAILED
}

/// Normalize and validate an HTTP method; returns the uppercase form.
pub fn normalize_method(method: &str) -> Result<String, CoreError> {
    let upper = method.trim().to_ascii_uppercase();
    if VALID_METHODS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(CoreError::Validation(format!(
            "Method '{method}' cannot be queued. Must be one of: {}",
            VALID_METHODS.join(", ")
        )))
    }
}

pub fn validate_endpoint(endpoint: &str) -> Result<(), CoreError> {
    if !endpoint.starts_with(ENDPOINT_PREFIX) {
        return Err(CoreError::Validation(format!(
            "Endpoint must start with '{ENDPOINT_PREFIX}'"
        )));
    }
    if endpoint.len() > MAX_ENDPOINT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Endpoint exceeds {MAX_ENDPOINT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pending_moves_to_synced_or_failed() {
        assert!(validate_transition(STATUS_PENDING, STATUS_SYNCED, None).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_FAILED, Some("timeout")).is_ok());
    }

    #[test]
    fn failed_requires_error_message() {
        assert_matches!(
            validate_transition(STATUS_PENDING, STATUS_FAILED, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(STATUS_PENDING, STATUS_FAILED, Some("  ")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn failed_can_be_requeued() {
        assert!(validate_transition(STATUS_FAILED, STATUS_PENDING, None).is_ok());
        assert!(validate_transition(STATUS_FAILED, STATUS_SYNCED, None).is_ok());
    }

    #[test]
    fn synced_is_terminal() {
        for next in VALID_STATUSES {
            assert_matches!(
                validate_transition(STATUS_SYNCED, next, Some("x")),
                Err(CoreError::Conflict(_))
            );
        }
    }

    #[test]
    fn unknown_target_status_is_validation_error() {
        assert_matches!(
            validate_transition(STATUS_PENDING, "done", None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn requeue_is_not_an_attempt() {
        assert!(counts_as_attempt(STATUS_SYNCED));
        assert!(counts_as_attempt(STATUS_FAILED));
        assert!(!counts_as_attempt(STATUS_PENDING));
    }

    #[test]
    fn methods_are_normalized() {
        assert_eq!(normalize_method("post").unwrap(), "POST");
        assert_eq!(normalize_method(" Delete ").unwrap(), "DELETE");
        assert!(normalize_method("GET").is_err());
    }

    #[test]
    fn endpoints_must_target_the_api() {
        assert!(validate_endpoint("/api/prayers").is_ok());
        assert!(validate_endpoint("https://evil.example/api/x").is_err());
        assert!(validate_endpoint("/health").is_err());
    }
}
