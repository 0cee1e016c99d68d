//! Obstacle feed - materializes new obstacles at the top of the track.
//!
//! Lane is uniform over the three lanes; the kind is `Fast` with probability
//! [`FAST_CHANCE_PERMILLE`]/1000, else `Normal`.

use crate::obstacle::Obstacle;
use crate::rng::SimpleRng;
use crate::types::{Lane, ObstacleKind, FAST_CHANCE_PERMILLE, LANE_COUNT};

/// Roll the next obstacle. Draw order is kind first, then lane.
pub fn roll_obstacle(rng: &mut SimpleRng, id: u32) -> Obstacle {
    let kind = if rng.chance_permille(FAST_CHANCE_PERMILLE) {
        ObstacleKind::Fast
    } else {
        ObstacleKind::Normal
    };
    let lane = Lane::from_index(rng.next_range(LANE_COUNT as u32) as u8).unwrap_or_default();
    Obstacle::new(id, lane, kind)
}
