//! Score record documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PlayerName;

/// Store-assigned document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A score about to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScoreRecord {
    pub player_name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

impl NewScoreRecord {
    /// Record for a run that just finished, stamped now.
    pub fn now(player_name: &PlayerName, score: u32) -> Self {
        Self {
            player_name: player_name.as_str().to_string(),
            score,
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(self, id: RecordId) -> ScoreRecord {
        ScoreRecord {
            id,
            player_name: self.player_name,
            score: self.score,
            timestamp: self.timestamp,
        }
    }
}

/// A persisted score. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: RecordId,
    pub player_name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

/// Leaderboard order: score descending, newer first on ties, then id.
pub fn rank_records(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
            .then_with(|| a.id.cmp(&b.id))
    });
}
