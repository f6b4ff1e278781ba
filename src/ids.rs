//! Pet id allocation.
//!
//! Ids come from the store's atomic increment on a reserved counter key, so
//! concurrent creates never see the same id and deleted ids are never reused.

use crate::error::ApiError;
use crate::store::StoreClient;

/// Reserved key holding the last issued id; never a pet
pub const INDEX_KEY: &str = "index";

/// Allocate the next pet id
pub async fn next_id(store: &StoreClient) -> Result<u64, ApiError> {
    let value = store.increment(INDEX_KEY).await?;
    let id = id_from_counter(value)?;
    tracing::debug!("Allocated pet id: {}", id);
    Ok(id)
}

// The store is reachable but the counter holds something no id can be.
fn id_from_counter(value: i64) -> Result<u64, ApiError> {
    u64::try_from(value).map_err(|_| ApiError::CorruptRecord {
        key: INDEX_KEY.to_string(),
        reason: format!("id counter is negative: {}", value),
    })
}
