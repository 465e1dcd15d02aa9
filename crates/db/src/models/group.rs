//! Group and membership models and DTOs.

use noor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: DbId,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_public: Option<bool>,
}

/// DTO for updating a group. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// A row from the `group_memberships` table. Unique per (group, user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupMembership {
    pub id: DbId,
    pub group_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
}

/// DTO for adding a member.
#[derive(Debug, Clone)]
pub struct CreateMembership {
    pub group_id: DbId,
    pub user_id: DbId,
    pub role: String,
}
