//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input with `noor_core`, call the [`Storage`] in
//! [`AppState`], and map failures via [`AppError`].
//!
//! [`Storage`]: noor_db::Storage
//! [`AppState`]: crate::state::AppState

pub mod achievement;
pub mod auth;
pub mod challenge;
pub mod fasting;
pub mod group;
pub mod prayer;
pub mod quote;
pub mod quran_reading;
pub mod stats;
pub mod sync;

use noor_core::error::CoreError;
use noor_core::types::{Day, DbId};

use crate::error::AppError;

/// The server's current calendar day (UTC).
pub(crate) fn today() -> Day {
    chrono::Utc::now().date_naive()
}

pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}
