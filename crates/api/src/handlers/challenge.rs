//! Handlers for the `/challenges` resource and challenge progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::error::CoreError;
use noor_core::group::{
    in_window, validate_challenge_title, validate_description, validate_target, validate_window,
    CHALLENGE_FASTING, CHALLENGE_PRAYER, CHALLENGE_QURAN,
};
use noor_core::prayer::is_performed;
use noor_core::roles::MEMBER_ROLE_OWNER;
use noor_core::types::{Day, DbId};
use noor_db::models::challenge::{Challenge, UpdateChallenge};
use noor_db::models::group::GroupMembership;
use noor_db::models::DateRange;
use serde::Serialize;

use super::group::{load_visible, require_member};
use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One member's standing in a challenge.
#[derive(Debug, Serialize)]
pub struct MemberProgress {
    pub user_id: DbId,
    pub username: Option<String>,
    pub progress: i64,
    pub completed: bool,
}

/// Progress of every group member, best first.
#[derive(Debug, Serialize)]
pub struct ChallengeProgress {
    pub challenge_id: DbId,
    pub kind: String,
    pub target: i32,
    pub start_date: Day,
    pub end_date: Day,
    pub members: Vec<MemberProgress>,
}

/// GET /api/challenges/{id} (group members only)
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Challenge>> {
    let (challenge, _) = load_for_member(&state, &auth, id).await?;
    Ok(Json(challenge))
}

/// PUT /api/challenges/{id} (creator or group owner)
///
/// The kind is fixed at creation; the merged date window is validated.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateChallenge>,
) -> AppResult<Json<Challenge>> {
    let (current, membership) = load_for_member(&state, &auth, id).await?;
    require_manager(&current, &membership, &auth)?;

    if let Some(title) = &input.title {
        validate_challenge_title(title)?;
    }
    validate_description(input.description.as_deref())?;
    if let Some(target) = input.target {
        validate_target(target)?;
    }
    validate_window(
        input.start_date.unwrap_or(current.start_date),
        input.end_date.unwrap_or(current.end_date),
    )?;

    let challenge = state
        .storage
        .update_challenge(id, &input)
        .await?
        .ok_or_else(|| not_found("Challenge", id))?;
    Ok(Json(challenge))
}

/// DELETE /api/challenges/{id} (creator or group owner)
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (current, membership) = load_for_member(&state, &auth, id).await?;
    require_manager(&current, &membership, &auth)?;

    if state.storage.delete_challenge(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Challenge", id))
    }
}

/// GET /api/challenges/{id}/progress (group members only)
///
/// Counts each member's qualifying activity inside the challenge window:
/// prayers not missed, completed fasts, or ayat read.
pub async fn progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ChallengeProgress>> {
    let (challenge, _) = load_for_member(&state, &auth, id).await?;
    let window = DateRange::between(challenge.start_date, challenge.end_date);

    let mut members = Vec::new();
    for member in state.storage.list_members(challenge.group_id).await? {
        let progress = member_progress(&state, &challenge, member.user_id, window).await?;
        let username = state
            .storage
            .find_user_by_id(member.user_id)
            .await?
            .map(|u| u.username);
        members.push(MemberProgress {
            user_id: member.user_id,
            username,
            progress,
            completed: progress >= i64::from(challenge.target),
        });
    }
    members.sort_by(|a, b| b.progress.cmp(&a.progress).then(a.user_id.cmp(&b.user_id)));

    Ok(Json(ChallengeProgress {
        challenge_id: challenge.id,
        kind: challenge.kind,
        target: challenge.target,
        start_date: challenge.start_date,
        end_date: challenge.end_date,
        members,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn member_progress(
    state: &AppState,
    challenge: &Challenge,
    user_id: DbId,
    window: DateRange,
) -> AppResult<i64> {
    let (start, end) = (challenge.start_date, challenge.end_date);
    let count = match challenge.kind.as_str() {
        CHALLENGE_PRAYER => state
            .storage
            .list_prayers(user_id, window)
            .await?
            .iter()
            .filter(|p| in_window(p.prayer_date, start, end) && is_performed(&p.status))
            .count() as i64,
        CHALLENGE_FASTING => state
            .storage
            .list_fastings(user_id, window)
            .await?
            .iter()
            .filter(|f| in_window(f.fast_date, start, end) && f.completed)
            .count() as i64,
        CHALLENGE_QURAN => state
            .storage
            .list_quran_readings(user_id, window)
            .await?
            .iter()
            .filter(|r| in_window(r.reading_date, start, end))
            .map(|r| r.ayat())
            .sum(),
        other => {
            return Err(AppError::InternalError(format!(
                "Challenge {} has unknown kind '{other}'",
                challenge.id
            )))
        }
    };
    Ok(count)
}

/// Fetch a challenge and require the caller to be a member of its group.
async fn load_for_member(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<(Challenge, GroupMembership)> {
    let challenge = state
        .storage
        .find_challenge(id)
        .await?
        .ok_or_else(|| not_found("Challenge", id))?;
    let (_, membership) = load_visible(state, auth, challenge.group_id).await?;
    let membership = require_member(membership.as_ref())?.clone();
    Ok((challenge, membership))
}

fn require_manager(
    challenge: &Challenge,
    membership: &GroupMembership,
    auth: &AuthUser,
) -> AppResult<()> {
    if challenge.created_by == auth.user_id || membership.role == MEMBER_ROLE_OWNER {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only the challenge creator or group owner can do this".into(),
        )))
    }
}
