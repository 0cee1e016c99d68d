//! Obstacle entity and its track geometry predicates.

use crate::types::{
    Lane, ObstacleKind, COLLISION_BAND_BOTTOM, COLLISION_BAND_TOP, TRACK_HEIGHT,
};

/// A falling obstacle.
///
/// Created at `top = 0` by the feed; only the motion step moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Per-run identifier, increasing in spawn order.
    pub id: u32,
    pub lane: Lane,
    /// Vertical position of the obstacle's top edge.
    pub top: f32,
    /// Base speed in track units per motion tick.
    pub speed: f32,
    /// Points credited when it passes the bottom boundary.
    pub points: u32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// New obstacle of `kind` at the top of `lane`.
    pub fn new(id: u32, lane: Lane, kind: ObstacleKind) -> Self {
        Self {
            id,
            lane,
            top: 0.0,
            speed: kind.speed(),
            points: kind.points(),
            kind,
        }
    }

    /// Same obstacle placed at `top`.
    pub fn at(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    /// True once the obstacle is below the bottom boundary.
    pub fn has_passed(&self) -> bool {
        self.top > TRACK_HEIGHT
    }

    /// True while the obstacle overlaps the car's vertical extent.
    pub fn in_collision_band(&self) -> bool {
        self.top > COLLISION_BAND_TOP && self.top < COLLISION_BAND_BOTTOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_obstacle_takes_kind_tables() {
        let o = Obstacle::new(7, Lane::Right, ObstacleKind::Fast);
        assert_eq!(o.id, 7);
        assert_eq!(o.top, 0.0);
        assert_eq!(o.speed, 25.0);
        assert_eq!(o.points, 40);
    }

    #[test]
    fn band_edges_are_exclusive() {
        let o = Obstacle::new(1, Lane::Left, ObstacleKind::Normal);
        assert!(!o.at(440.0).in_collision_band());
        assert!(o.at(440.5).in_collision_band());
        assert!(o.at(499.9).in_collision_band());
        assert!(!o.at(500.0).in_collision_band());
    }

    #[test]
    fn boundary_is_strictly_greater() {
        let o = Obstacle::new(1, Lane::Left, ObstacleKind::Normal);
        assert!(!o.at(500.0).has_passed());
        assert!(o.at(500.1).has_passed());
    }
}
