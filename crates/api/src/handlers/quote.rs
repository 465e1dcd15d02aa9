//! Handlers for the `/quotes` resource.
//!
//! Reading is public; adding and removing quotes requires an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noor_core::quotes::{daily_index, validate_quote};
use noor_core::types::DbId;
use noor_db::models::quote::{CreateQuote, Quote};

use super::{not_found, today};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{CategoryFilterParams, DayParams};
use crate::state::AppState;

/// GET /api/quotes?category=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryFilterParams>,
) -> AppResult<Json<Vec<Quote>>> {
    let quotes = state.storage.list_quotes(params.category.as_deref()).await?;
    Ok(Json(quotes))
}

/// GET /api/quotes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Quote>> {
    let quote = state
        .storage
        .find_quote(id)
        .await?
        .ok_or_else(|| not_found("Quote", id))?;
    Ok(Json(quote))
}

/// GET /api/quotes/daily?date=
///
/// The same quote for everyone on a given day; `null` when there are none.
pub async fn daily(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DayParams>,
) -> AppResult<Json<Option<Quote>>> {
    let day = params.date.unwrap_or_else(today);
    let mut quotes = state.storage.list_quotes(None).await?;
    let quote = daily_index(day, quotes.len()).map(|i| quotes.swap_remove(i));
    Ok(Json(quote))
}

/// POST /api/quotes (admin only)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateQuote>,
) -> AppResult<(StatusCode, Json<Quote>)> {
    validate_quote(&input.text, &input.source)?;
    let quote = state.storage.create_quote(&input).await?;
    tracing::info!(admin_id = admin.user_id, quote_id = quote.id, "Quote added");
    Ok((StatusCode::CREATED, Json(quote)))
}

/// DELETE /api/quotes/{id} (admin only)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.storage.delete_quote(id).await? {
        tracing::info!(admin_id = admin.user_id, quote_id = id, "Quote deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Quote", id))
    }
}
