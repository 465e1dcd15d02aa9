//! Handlers for the `/groups` resource: groups, membership and the
//! group-scoped challenge collection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::error::CoreError;
use noor_core::group::{
    validate_challenge_kind, validate_challenge_title, validate_description,
    validate_group_name, validate_target, validate_window,
};
use noor_core::roles::{MEMBER_ROLE_MEMBER, MEMBER_ROLE_OWNER};
use noor_core::types::DbId;
use noor_db::models::challenge::{Challenge, CreateChallenge};
use noor_db::models::group::{CreateGroup, CreateMembership, Group, GroupMembership, UpdateGroup};

use super::achievement::award_achievements;
use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// POST /api/groups
///
/// The creator becomes the group's owner.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateGroup>,
) -> AppResult<(StatusCode, Json<Group>)> {
    validate_group_name(&input.name)?;
    validate_description(input.description.as_deref())?;

    let (group, _) = state
        .storage
        .create_group_with_owner(auth.user_id, &input)
        .await?;
    tracing::info!(user_id = auth.user_id, group_id = group.id, "Group created");

    award_achievements(&state, auth.user_id).await;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /api/groups
///
/// Public groups plus every group the caller belongs to.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Group>>> {
    Ok(Json(state.storage.list_visible_groups(auth.user_id).await?))
}

/// GET /api/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Group>> {
    let (group, _) = load_visible(&state, &auth, id).await?;
    Ok(Json(group))
}

/// PUT /api/groups/{id} (owner only)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateGroup>,
) -> AppResult<Json<Group>> {
    let (_, membership) = load_visible(&state, &auth, id).await?;
    require_owner(membership.as_ref())?;
    if let Some(name) = &input.name {
        validate_group_name(name)?;
    }
    validate_description(input.description.as_deref())?;

    let group = state
        .storage
        .update_group(id, &input)
        .await?
        .ok_or_else(|| not_found("Group", id))?;
    Ok(Json(group))
}

/// DELETE /api/groups/{id} (owner only)
///
/// Memberships and challenges are removed with the group.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (_, membership) = load_visible(&state, &auth, id).await?;
    require_owner(membership.as_ref())?;

    if state.storage.delete_group(id).await? {
        tracing::info!(user_id = auth.user_id, group_id = id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Group", id))
    }
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// GET /api/groups/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<GroupMembership>>> {
    load_visible(&state, &auth, id).await?;
    Ok(Json(state.storage.list_members(id).await?))
}

/// POST /api/groups/{id}/join
///
/// Only public groups can be joined; joining twice is a conflict.
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<GroupMembership>)> {
    let group = state
        .storage
        .find_group(id)
        .await?
        .ok_or_else(|| not_found("Group", id))?;
    if state.storage.find_membership(id, auth.user_id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Already a member of this group".into(),
        )));
    }
    if !group.is_public {
        return Err(AppError::Core(CoreError::Forbidden(
            "This group is private".into(),
        )));
    }

    let membership = state
        .storage
        .add_member(&CreateMembership {
            group_id: id,
            user_id: auth.user_id,
            role: MEMBER_ROLE_MEMBER.to_string(),
        })
        .await?;
    tracing::info!(user_id = auth.user_id, group_id = id, "Joined group");

    award_achievements(&state, auth.user_id).await;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// POST /api/groups/{id}/leave
///
/// The owner cannot leave; they delete the group instead.
pub async fn leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (_, membership) = load_visible(&state, &auth, id).await?;
    let membership = membership.ok_or_else(|| not_found("GroupMembership", id))?;
    if membership.role == MEMBER_ROLE_OWNER {
        return Err(AppError::Core(CoreError::Conflict(
            "The group owner cannot leave the group".into(),
        )));
    }

    state.storage.remove_member(id, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, group_id = id, "Left group");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

/// GET /api/groups/{id}/challenges (members only)
pub async fn list_challenges(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Challenge>>> {
    let (_, membership) = load_visible(&state, &auth, id).await?;
    require_member(membership.as_ref())?;
    Ok(Json(state.storage.list_challenges(id).await?))
}

/// POST /api/groups/{id}/challenges (members only)
pub async fn create_challenge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateChallenge>,
) -> AppResult<(StatusCode, Json<Challenge>)> {
    let (_, membership) = load_visible(&state, &auth, id).await?;
    require_member(membership.as_ref())?;

    validate_challenge_title(&input.title)?;
    validate_description(input.description.as_deref())?;
    validate_challenge_kind(&input.kind)?;
    validate_target(input.target)?;
    validate_window(input.start_date, input.end_date)?;

    let challenge = state
        .storage
        .create_challenge(id, auth.user_id, &input)
        .await?;
    tracing::info!(
        user_id = auth.user_id,
        group_id = id,
        challenge_id = challenge.id,
        "Challenge created"
    );
    Ok((StatusCode::CREATED, Json(challenge)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a group the caller may see, together with the caller's membership.
///
/// Private groups are reported as missing to non-members.
pub(crate) async fn load_visible(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<(Group, Option<GroupMembership>)> {
    let group = state
        .storage
        .find_group(id)
        .await?
        .ok_or_else(|| not_found("Group", id))?;
    let membership = state.storage.find_membership(id, auth.user_id).await?;
    if !group.is_public && membership.is_none() {
        return Err(not_found("Group", id));
    }
    Ok((group, membership))
}

pub(crate) fn require_member(membership: Option<&GroupMembership>) -> AppResult<&GroupMembership> {
    membership.ok_or_else(|| {
        AppError::Core(CoreError::Forbidden(
            "Only group members can do this".into(),
        ))
    })
}

fn require_owner(membership: Option<&GroupMembership>) -> AppResult<()> {
    match membership {
        Some(m) if m.role == MEMBER_ROLE_OWNER => Ok(()),
        _ => Err(AppError::Core(CoreError::Forbidden(
            "Only the group owner can do this".into(),
        ))),
    }
}
