//! Repository for the `prayers` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::prayer::{CreatePrayer, Prayer, UpdatePrayer};
use crate::models::DateRange;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, prayer_date, status, in_congregation, notes, \
                       created_at, updated_at";

/// Provides CRUD operations for prayer logs.
pub struct PrayerRepo;

impl PrayerRepo {
    /// Insert a new prayer log, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `on_time`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePrayer,
    ) -> Result<Prayer, sqlx::Error> {
        let query = format!(
            "INSERT INTO prayers (user_id, name, prayer_date, status, in_congregation, notes)
             VALUES ($1, $2, $3, COALESCE($4, 'on_time'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prayer>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.prayer_date)
            .bind(&input.status)
            .bind(input.in_congregation)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a prayer log by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prayer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prayers WHERE id = $1");
        sqlx::query_as::<_, Prayer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's prayers inside `range`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        range: DateRange,
    ) -> Result<Vec<Prayer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prayers
             WHERE user_id = $1
               AND ($2::date IS NULL OR prayer_date >= $2)
               AND ($3::date IS NULL OR prayer_date <= $3)
             ORDER BY prayer_date DESC, id DESC"
        );
        sqlx::query_as::<_, Prayer>(&query)
            .bind(user_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(pool)
            .await
    }

    /// Update a prayer log. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePrayer,
    ) -> Result<Option<Prayer>, sqlx::Error> {
        let query = format!(
            "UPDATE prayers SET
                name = COALESCE($2, name),
                prayer_date = COALESCE($3, prayer_date),
                status = COALESCE($4, status),
                in_congregation = COALESCE($5, in_congregation),
                notes = COALESCE($6, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prayer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.prayer_date)
            .bind(&input.status)
            .bind(input.in_congregation)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prayer log. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prayers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
