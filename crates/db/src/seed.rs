//! Startup seeding of reference data.

use noor_core::quotes::SEED_QUOTES;

use crate::error::StorageResult;
use crate::models::quote::CreateQuote;
use crate::storage::Storage;

/// Load the built-in quotes if the quote table is empty.
///
/// Returns the number of quotes inserted (zero when quotes already exist).
pub async fn ensure_quotes(storage: &dyn Storage) -> StorageResult<usize> {
    if !storage.list_quotes(None).await?.is_empty() {
        return Ok(0);
    }
    for seed in SEED_QUOTES {
        storage.create_quote(&CreateQuote::from(seed)).await?;
    }
    tracing::info!(count = SEED_QUOTES.len(), "Seeded default quotes");
    Ok(SEED_QUOTES.len())
}
