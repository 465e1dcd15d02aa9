//! Repository for the `challenges` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::challenge::{Challenge, CreateChallenge, UpdateChallenge};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, group_id, created_by, title, description, kind, target, \
                       start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for group challenges.
pub struct ChallengeRepo;

impl ChallengeRepo {
    pub async fn create(
        pool: &PgPool,
        group_id: DbId,
        created_by: DbId,
        input: &CreateChallenge,
    ) -> Result<Challenge, sqlx::Error> {
        let query = format!(
            "INSERT INTO challenges
                (group_id, created_by, title, description, kind, target, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(group_id)
            .bind(created_by)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(input.target)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE id = $1");
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Challenges of a group, latest start date first.
    pub async fn list_for_group(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<Challenge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM challenges
             WHERE group_id = $1
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    /// Update a challenge. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChallenge,
    ) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!(
            "UPDATE challenges SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                target = COALESCE($4, target),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.target)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM challenges WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
