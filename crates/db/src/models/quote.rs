//! Quote model and DTOs.

use noor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub text: String,
    pub source: String,
    pub category: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for adding a quote.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuote {
    pub text: String,
    pub source: String,
    pub category: Option<String>,
}

impl From<&noor_core::quotes::SeedQuote> for CreateQuote {
    fn from(seed: &noor_core::quotes::SeedQuote) -> Self {
        Self {
            text: seed.text.to_string(),
            source: seed.source.to_string(),
            category: Some(seed.category.to_string()),
        }
    }
}
