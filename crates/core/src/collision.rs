//! Collision detector.
//!
//! An obstacle hits the car when it shares the player's lane and its top sits
//! inside the collision band. Detection never moves or removes obstacles.

use crate::obstacle::Obstacle;
use crate::types::Lane;

pub fn collides(obstacle: &Obstacle, player_lane: Lane) -> bool {
    obstacle.lane == player_lane && obstacle.in_collision_band()
}

/// First obstacle (in spawn order) hitting the car, if any.
pub fn find_collision(obstacles: &[Obstacle], player_lane: Lane) -> Option<&Obstacle> {
    obstacles.iter().find(|o| collides(o, player_lane))
}
