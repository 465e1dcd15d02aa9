//! Repository for the `quotes` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote::{CreateQuote, Quote};

const COLUMNS: &str = "id, text, source, category, created_at";

/// Provides CRUD operations for inspirational quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    pub async fn create(pool: &PgPool, input: &CreateQuote) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (text, source, category)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(&input.text)
            .bind(&input.source)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All quotes ordered by id, optionally restricted to one category.
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
