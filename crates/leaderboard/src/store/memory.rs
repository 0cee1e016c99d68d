use std::collections::HashMap;

use tokio::sync::Mutex;

use super::{validate_collection, ScoreStore};
use crate::error::StoreError;
use crate::record::{rank_records, NewScoreRecord, RecordId, ScoreRecord};

/// Process-local store. Used for offline play and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<ScoreRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl ScoreStore for MemoryStore {
    async fn create(&self, collection: &str, record: NewScoreRecord) -> Result<RecordId, StoreError> {
        validate_collection(collection)?;
        let id = RecordId::generate();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.with_id(id.clone()));
        Ok(id)
    }

    async fn top_scores(&self, collection: &str, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        validate_collection(collection)?;
        let mut records = {
            let collections = self.collections.lock().await;
            collections.get(collection).cloned().unwrap_or_default()
        };
        rank_records(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}
