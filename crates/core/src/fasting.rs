//! Fast types and validation.

use crate::error::CoreError;

pub const TYPE_RAMADAN: &str = "ramadan";
pub const TYPE_VOLUNTARY: &str = "voluntary";
/// Making up a missed obligatory fast.
pub const TYPE_MAKEUP: &str = "makeup";
pub const TYPE_MONDAY_THURSDAY: &str = "monday_thursday";
/// The 13th, 14th and 15th of each lunar month.
pub const TYPE_WHITE_DAYS: &str = "white_days";
pub const TYPE_ARAFAH: &str = "arafah";
pub const TYPE_ASHURA: &str = "ashura";

pub const VALID_TYPES: &[&str] = &[
    TYPE_RAMADAN,
    TYPE_VOLUNTARY,
    TYPE_MAKEUP,
    TYPE_MONDAY_THURSDAY,
    TYPE_WHITE_DAYS,
    TYPE_ARAFAH,
    TYPE_ASHURA,
];

pub fn validate_type(fast_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&fast_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid fast type '{fast_type}'. Must be one of: {}",
            VALID_TYPES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_are_valid() {
        for t in VALID_TYPES {
            assert!(validate_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = validate_type("juice_cleanse").unwrap_err();
        assert!(err.to_string().contains("juice_cleanse"));
    }
}
