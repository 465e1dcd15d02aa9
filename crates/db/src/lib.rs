//! Persistence layer: models, the [`Storage`] abstraction and its two
//! backends (in-memory and PostgreSQL).

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod mem;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod seed;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use mem::MemStorage;
pub use pg::PgStorage;
pub use storage::Storage;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
