//! Username, email, and display-name rules for accounts.

use validator::ValidateEmail;

use crate::error::CoreError;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 32;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 80;

/// Usernames are 3-32 characters of ASCII letters, digits, `_`, `.` or `-`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_', '.' and '-'".into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

pub fn validate_display_name(name: Option<&str>) -> Result<(), CoreError> {
    match name {
        Some(n) if n.trim().is_empty() => Err(CoreError::Validation(
            "Display name must not be blank".into(),
        )),
        Some(n) if n.chars().count() > MAX_DISPLAY_NAME_LENGTH => Err(CoreError::Validation(
            format!("Display name exceeds {MAX_DISPLAY_NAME_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

/// Emails are compared case-insensitively; store them lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
