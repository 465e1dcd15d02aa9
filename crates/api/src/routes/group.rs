//! Route definitions for the `/groups` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update (owner only)
/// DELETE /{id}                -> delete (owner only)
/// GET    /{id}/members        -> list_members
/// POST   /{id}/join           -> join
/// POST   /{id}/leave          -> leave
/// GET    /{id}/challenges     -> list_challenges
/// POST   /{id}/challenges     -> create_challenge (members only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route(
            "/{id}",
            get(group::get_by_id)
                .put(group::update)
                .delete(group::delete),
        )
        .route("/{id}/members", get(group::list_members))
        .route("/{id}/join", post(group::join))
        .route("/{id}/leave", post(group::leave))
        .route(
            "/{id}/challenges",
            get(group::list_challenges).post(group::create_challenge),
        )
}
