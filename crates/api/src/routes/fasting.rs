//! Route definitions for the `/fastings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fasting;
use crate::state::AppState;

/// Routes mounted at `/fastings`.
///
/// ```text
/// GET    /          -> list (?date= | ?from=&to=)
/// POST   /          -> create
/// GET    /streak    -> streak
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fasting::list).post(fasting::create))
        .route("/streak", get(fasting::streak))
        .route(
            "/{id}",
            get(fasting::get_by_id)
                .put(fasting::update)
                .delete(fasting::delete),
        )
}
