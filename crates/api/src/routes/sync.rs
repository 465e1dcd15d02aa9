//! Route definitions for the `/sync` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// GET    /        -> list (?status=)
/// POST   /        -> create
/// PUT    /{id}    -> update (status transition)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sync::list).post(sync::create))
        .route("/{id}", put(sync::update).delete(sync::delete))
}
