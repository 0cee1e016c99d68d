use crate::obstacle::Obstacle;
use crate::types::Lane;

/// Read-only copy of a run for views and comparisons.
///
/// `Default` is the state of a freshly (re)started run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSnapshot {
    pub player_lane: Lane,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub is_over: bool,
    pub crashed_into: Option<u32>,
}
