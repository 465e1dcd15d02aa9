//! Route definitions for the `/quran-readings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quran_reading;
use crate::state::AppState;

/// Routes mounted at `/quran-readings`.
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
        .route("/", get(quran_reading::list).post(quran_reading::create))
        .route("/streak", get(quran_reading::streak))
        .route(
            "/{id}",
            get(quran_reading::get_by_id)
                .put(quran_reading::update)
                .delete(quran_reading::delete),
        )
}
