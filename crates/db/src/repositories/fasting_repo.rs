//! Repository for the `fastings` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::fasting::{CreateFasting, Fasting, UpdateFasting};
use crate::models::DateRange;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, fast_date, fast_type, completed, notes, created_at, updated_at";

/// Provides CRUD operations for fasting logs.
pub struct FastingRepo;

impl FastingRepo {
    /// Insert a new fasting log. `completed` defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFasting,
    ) -> Result<Fasting, sqlx::Error> {
        let query = format!(
            "INSERT INTO fastings (user_id, fast_date, fast_type, completed, notes)
             VALUES ($1, $2, $3, COALESCE($4, true), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fasting>(&query)
            .bind(user_id)
            .bind(input.fast_date)
            .bind(&input.fast_type)
            .bind(input.completed)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fasting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fastings WHERE id = $1");
        sqlx::query_as::<_, Fasting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's fasts inside `range`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        range: DateRange,
    ) -> Result<Vec<Fasting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fastings
             WHERE user_id = $1
               AND ($2::date IS NULL OR fast_date >= $2)
               AND ($3::date IS NULL OR fast_date <= $3)
             ORDER BY fast_date DESC, id DESC"
        );
        sqlx::query_as::<_, Fasting>(&query)
            .bind(user_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(pool)
            .await
    }

    /// Update a fasting log. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFasting,
    ) -> Result<Option<Fasting>, sqlx::Error> {
        let query = format!(
            "UPDATE fastings SET
                fast_date = COALESCE($2, fast_date),
                fast_type = COALESCE($3, fast_type),
                completed = COALESCE($4, completed),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fasting>(&query)
            .bind(id)
            .bind(input.fast_date)
            .bind(&input.fast_type)
            .bind(input.completed)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fastings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
