//! Route definitions for the `/challenges` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::challenge;
use crate::state::AppState;

/// Routes mounted at `/challenges`.
///
/// ```text
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (creator or group owner)
/// DELETE /{id}            -> delete (creator or group owner)
/// GET    /{id}/progress   -> progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(challenge::get_by_id)
                .put(challenge::update)
                .delete(challenge::delete),
        )
        .route("/{id}/progress", get(challenge::progress))
}
