/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Activity records are stamped with a calendar day, time-of-day ignored.
pub type Day = chrono::NaiveDate;
