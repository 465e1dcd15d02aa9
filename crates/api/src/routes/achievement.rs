//! Route definitions for the `/achievements` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::achievement;
use crate::state::AppState;

/// Routes mounted at `/achievements`.
///
/// ```text
/// GET  /           -> list
/// GET  /catalog    -> catalog (public)
/// POST /evaluate   -> evaluate_now
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(achievement::list))
        .route("/catalog", get(achievement::catalog))
        .route("/evaluate", post(achievement::evaluate_now))
}
