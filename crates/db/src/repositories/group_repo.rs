//! Repository for the `groups` table.

use noor_core::roles::MEMBER_ROLE_OWNER;
use noor_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::{CreateGroup, Group, GroupMembership, UpdateGroup};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_by, is_public, created_at, updated_at";

/// Provides CRUD operations for community groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group and its owner membership. `is_public` defaults to `true`.
    ///
    /// Runs in a transaction so a group never exists without its owner.
    pub async fn create_with_owner(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateGroup,
    ) -> Result<(Group, GroupMembership), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO groups (name, description, created_by, is_public)
             VALUES ($1, $2, $3, COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner_id)
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        let owner = sqlx::query_as::<_, GroupMembership>(
            "INSERT INTO group_memberships (group_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING id, group_id, user_id, role, joined_at",
        )
        .bind(group.id)
        .bind(owner_id)
        .bind(MEMBER_ROLE_OWNER)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((group, owner))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public groups plus the private groups `user_id` is a member of, newest first.
    pub async fn list_visible(pool: &PgPool, user_id: DbId) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM groups g
             WHERE g.is_public
                OR EXISTS (
                    SELECT 1 FROM group_memberships m
                    WHERE m.group_id = g.id AND m.user_id = $1
                )
             ORDER BY g.id DESC"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a group. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGroup,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE groups SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_public = COALESCE($4, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a group. Memberships and challenges go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
