use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{validate_collection, ScoreStore};
use crate::error::StoreError;
use crate::record::{rank_records, NewScoreRecord, RecordId, ScoreRecord};

/// One JSON array per collection, at `<dir>/<collection>.json`.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    // Serializes read-modify-write of collection files.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn load(&self, collection: &str) -> Result<Vec<ScoreRecord>, StoreError> {
        match tokio::fs::read(self.collection_path(collection)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, collection: &str, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

impl ScoreStore for FileStore {
    async fn create(&self, collection: &str, record: NewScoreRecord) -> Result<RecordId, StoreError> {
        validate_collection(collection)?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load(collection).await?;
        let id = RecordId::generate();
        records.push(record.with_id(id.clone()));
        self.save(collection, &records).await?;
        tracing::debug!(collection, %id, total = records.len(), "score record written");
        Ok(id)
    }

    async fn top_scores(&self, collection: &str, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        validate_collection(collection)?;
        let mut records = {
            let _guard = self.write_lock.lock().await;
            self.load(collection).await?
        };
        rank_records(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_record(name: &str, score: u32) -> NewScoreRecord {
        NewScoreRecord {
            player_name: name.to_string(),
            score,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.create("scores", new_record("Ana", 120)).await.unwrap();
            store.create("scores", new_record("Bo", 300)).await.unwrap();
        }

        let store = FileStore::open(dir.path()).await.unwrap();
        let top = store.top_scores("scores", 10).await.unwrap();
        let names: Vec<&str> = top.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Bo", "Ana"]);
        assert!(dir.path().join("scores.json").exists());
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).await.unwrap();
        assert!(store.top_scores("scores", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scores.json"), b"not json").unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let err = store.top_scores("scores", 10).await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn traversal_names_never_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let err = store.create("../evil", new_record("x", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCollection(_)));
    }
}
