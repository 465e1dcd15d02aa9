//! Group challenge model and DTOs.

use noor_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `challenges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Challenge {
    pub id: DbId,
    pub group_id: DbId,
    pub created_by: DbId,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub target: i32,
    pub start_date: Day,
    pub end_date: Day,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a challenge inside a group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChallenge {
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub target: i32,
    pub start_date: Day,
    pub end_date: Day,
}

/// DTO for updating a challenge. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChallenge {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target: Option<i32>,
    pub start_date: Option<Day>,
    pub end_date: Option<Day>,
}
