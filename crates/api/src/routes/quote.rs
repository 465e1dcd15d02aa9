//! Route definitions for the `/quotes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
///
/// ```text
/// GET    /          -> list (?category=)
/// POST   /          -> create (admin only)
/// GET    /daily     -> daily (?date=)
/// GET    /{id}      -> get_by_id
/// DELETE /{id}      -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quote::list).post(quote::create))
        .route("/daily", get(quote::daily))
        .route("/{id}", get(quote::get_by_id).delete(quote::delete))
}
