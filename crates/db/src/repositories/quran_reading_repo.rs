//! Repository for the `quran_readings` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::quran::{CreateQuranReading, QuranReading, UpdateQuranReading};
use crate::models::DateRange;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, reading_date, surah, start_ayah, end_ayah, pages, \
                       duration_minutes, notes, created_at, updated_at";

/// Provides CRUD operations for Quran readings.
pub struct QuranReadingRepo;

impl QuranReadingRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateQuranReading,
    ) -> Result<QuranReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO quran_readings
                (user_id, reading_date, surah, start_ayah, end_ayah, pages, duration_minutes, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuranReading>(&query)
            .bind(user_id)
            .bind(input.reading_date)
            .bind(input.surah)
            .bind(input.start_ayah)
            .bind(input.end_ayah)
            .bind(input.pages)
            .bind(input.duration_minutes)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuranReading>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quran_readings WHERE id = $1");
        sqlx::query_as::<_, QuranReading>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's readings inside `range`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        range: DateRange,
    ) -> Result<Vec<QuranReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quran_readings
             WHERE user_id = $1
               AND ($2::date IS NULL OR reading_date >= $2)
               AND ($3::date IS NULL OR reading_date <= $3)
             ORDER BY reading_date DESC, id DESC"
        );
        sqlx::query_as::<_, QuranReading>(&query)
            .bind(user_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(pool)
            .await
    }

    /// Update a reading. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuranReading,
    ) -> Result<Option<QuranReading>, sqlx::Error> {
        let query = format!(
            "UPDATE quran_readings SET
                reading_date = COALESCE($2, reading_date),
                surah = COALESCE($3, surah),
                start_ayah = COALESCE($4, start_ayah),
                end_ayah = COALESCE($5, end_ayah),
                pages = COALESCE($6, pages),
                duration_minutes = COALESCE($7, duration_minutes),
                notes = COALESCE($8, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuranReading>(&query)
            .bind(id)
            .bind(input.reading_date)
            .bind(input.surah)
            .bind(input.start_ayah)
            .bind(input.end_ayah)
            .bind(input.pages)
            .bind(input.duration_minutes)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quran_readings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
