//! Errors returned by every [`Storage`](crate::storage::Storage) backend.

/// Storage-level failure.
///
/// The SQL backend surfaces raw [`sqlx::Error`]s (unique violations included,
/// classified later by constraint name). The in-memory backend reports its
/// uniqueness checks as [`StorageError::UniqueViolation`] using the same
/// constraint names as the migrations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(&'static str),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Unique constraint names (must match `db/migrations`)
// ---------------------------------------------------------------------------

pub const UQ_USERS_USERNAME: &str = "uq_users_username";
pub const UQ_USERS_EMAIL: &str = "uq_users_email";
pub const UQ_PRAYERS_USER_DATE_NAME: &str = "uq_prayers_user_date_name";
pub const UQ_FASTINGS_USER_DATE: &str = "uq_fastings_user_date";
pub const UQ_ACHIEVEMENTS_USER_KIND: &str = "uq_achievements_user_kind";
pub const UQ_MEMBERSHIPS_GROUP_USER: &str = "uq_group_memberships_group_user";

impl StorageError {
    /// Whether this error is a unique-constraint violation in either backend.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::UniqueViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23505")
            }
            StorageError::Database(_) => false,
        }
    }
}
