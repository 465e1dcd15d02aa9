//! Shared query parameter types for API handlers.

use noor_core::error::CoreError;
use noor_core::types::Day;
use noor_db::models::DateRange;
use serde::Deserialize;

/// Date filter for activity listings (`?date=` or `?from=&to=`, inclusive).
#[derive(Debug, Default, Deserialize)]
pub struct DateFilterParams {
    pub date: Option<Day>,
    pub from: Option<Day>,
    pub to: Option<Day>,
}

impl DateFilterParams {
    /// Convert into a [`DateRange`]. `date` cannot be combined with a range,
    /// and `from` must not be after `to`.
    pub fn into_range(self) -> Result<DateRange, CoreError> {
        match (self.date, self.from, self.to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(CoreError::Validation(
                "Use either 'date' or 'from'/'to', not both".into(),
            )),
            (Some(day), None, None) => Ok(DateRange::day(day)),
            (None, Some(from), Some(to)) if from > to => Err(CoreError::Validation(
                "'from' must not be after 'to'".into(),
            )),
            (None, from, to) => Ok(DateRange { from, to }),
        }
    }
}

/// A single optional day (`?date=`), defaulting to today in handlers.
#[derive(Debug, Default, Deserialize)]
pub struct DayParams {
    pub date: Option<Day>,
}

/// Optional status filter (`?status=`).
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<String>,
}

/// Optional category filter (`?category=`).
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilterParams {
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn single_date_becomes_one_day_range() {
        let params = DateFilterParams {
            date: Some(day(3)),
            ..Default::default()
        };
        let range = params.into_range().unwrap();
        assert!(range.contains(day(3)));
        assert!(!range.contains(day(4)));
    }

    #[test]
    fn open_bounds_are_allowed() {
        let params = DateFilterParams {
            from: Some(day(3)),
            ..Default::default()
        };
        let range = params.into_range().unwrap();
        assert!(range.contains(day(30)));
        assert!(!range.contains(day(2)));
    }

    #[test]
    fn inverted_or_mixed_filters_are_rejected() {
        let inverted = DateFilterParams {
            from: Some(day(5)),
            to: Some(day(1)),
            ..Default::default()
        };
        assert_matches!(inverted.into_range(), Err(CoreError::Validation(_)));

        let mixed = DateFilterParams {
            date: Some(day(1)),
            to: Some(day(2)),
            ..Default::default()
        };
        assert_matches!(mixed.into_range(), Err(CoreError::Validation(_)));
    }
}
