//! Route definitions for the `/prayers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::prayer;
use crate::state::AppState;

/// Routes mounted at `/prayers`.
///
/// ```text
/// GET    /          -> list (?date= | ?from=&to=)
/// POST   /          -> create
/// GET    /streak    -> streak
/// GET    /daily     -> daily (?date=)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prayer::list).post(prayer::create))
        .route("/streak", get(prayer::streak))
        .route("/daily", get(prayer::daily))
        .route(
            "/{id}",
            get(prayer::get_by_id)
                .put(prayer::update)
                .delete(prayer::delete),
        )
}
