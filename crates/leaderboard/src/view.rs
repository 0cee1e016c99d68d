use crate::record::ScoreRecord;
use crate::types::LEADERBOARD_LIMIT;
use crate::worker::PersistEvent;

/// Read-only top scores shown on the scoreboard screen.
///
/// `activate` clears the list, marks it loading and returns the request
/// number the owner tags its fetch with. Only the completion carrying the
/// latest request number fills the list; older ones are ignored. A failed
/// fetch arrives as an empty list.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    entries: Vec<ScoreRecord>,
    pending: Option<u64>,
    last_request: u64,
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) -> u64 {
        self.last_request += 1;
        self.entries.clear();
        self.pending = Some(self.last_request);
        self.last_request
    }

    /// Apply a persistence completion. Returns true if the view changed.
    pub fn apply(&mut self, event: &PersistEvent) -> bool {
        let PersistEvent::Leaderboard { request, records } = event else {
            return false;
        };
        if self.pending != Some(*request) {
            return false;
        }
        self.entries = records.iter().take(LEADERBOARD_LIMIT).cloned().collect();
        self.pending = None;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// `(rank, player name, score)` rows, rank starting at 1.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &str, u32)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r.player_name.as_str(), r.score))
    }
}
