//! Repository for the `group_memberships` table.

use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::{CreateMembership, GroupMembership};

const COLUMNS: &str = "id, group_id, user_id, role, joined_at";

/// Provides membership operations for groups.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Add a user to a group. Fails with a unique violation on a second join.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMembership,
    ) -> Result<GroupMembership, sqlx::Error> {
        let query = format!(
            "INSERT INTO group_memberships (group_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(input.group_id)
            .bind(input.user_id)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
    ) -> Result<Option<GroupMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM group_memberships WHERE group_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(group_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Members of a group in join order.
    pub async fn list_for_group(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<GroupMembership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM group_memberships WHERE group_id = $1 ORDER BY id");
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    /// Every membership held by a user in join order.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GroupMembership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM group_memberships WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, group_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2")
                .bind(group_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
