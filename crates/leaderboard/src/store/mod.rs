//! Score storage backends.
//!
//! A store keeps named collections of [`ScoreRecord`] documents. Collections
//! are created on first write; querying a missing one yields no records.

use std::future::Future;

use crate::error::StoreError;
use crate::record::{NewScoreRecord, RecordId, ScoreRecord};

mod files;
mod memory;

pub use files::FileStore;
pub use memory::MemoryStore;

pub trait ScoreStore: Send + Sync + 'static {
    /// Append `record` to `collection` and return the id assigned to it.
    fn create(
        &self,
        collection: &str,
        record: NewScoreRecord,
    ) -> impl Future<Output = Result<RecordId, StoreError>> + Send;

    /// Up to `limit` records of `collection`, best score first.
    fn top_scores(
        &self,
        collection: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ScoreRecord>, StoreError>> + Send;
}

/// Collection names double as file names, so keep them to `[A-Za-z0-9_-]`.
pub fn validate_collection(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name.len() <= 64
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}
