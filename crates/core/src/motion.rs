//! Motion & scoring step.
//!
//! Every live obstacle advances by `speed * speed_multiplier(score)`. Obstacles
//! that pass the bottom boundary are removed and their points reported; the
//! caller credits them. The multiplier is computed once, from the score at the
//! start of the step, so the whole set moves on the same data.

use crate::obstacle::Obstacle;
use crate::types::{BASE_SPEED_MULTIPLIER, SCORE_RAMP_DIVISOR};

/// What one motion step did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionReport {
    /// Obstacles still on the track after moving.
    pub moved: usize,
    /// Obstacles removed for passing the boundary.
    pub passed: usize,
    /// Sum of the passed obstacles' points.
    pub points: u32,
}

/// Difficulty ramp: `1.5 + score / 1000`.
pub fn speed_multiplier(score: u32) -> f32 {
    BASE_SPEED_MULTIPLIER + score as f32 / SCORE_RAMP_DIVISOR
}

/// Advance every obstacle once and drop the ones that passed the boundary.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, score: u32) -> MotionReport {
    let multiplier = speed_multiplier(score);
    let mut report = MotionReport::default();

    obstacles.retain_mut(|obstacle| {
        obstacle.top += obstacle.speed * multiplier;
        if obstacle.has_passed() {
            report.passed += 1;
            report.points += obstacle.points;
            false
        } else {
            report.moved += 1;
            true
        }
    });

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Lane, ObstacleKind};

    #[test]
    fn multiplier_ramps_with_score() {
        assert_eq!(speed_multiplier(0), 1.5);
        assert_eq!(speed_multiplier(500), 2.0);
        assert_eq!(speed_multiplier(1000), 2.5);
    }

    #[test]
    fn normal_obstacle_moves_22_5_at_zero_score() {
        let mut obstacles = vec![Obstacle::new(1, Lane::Center, ObstacleKind::Normal)];
        let report = advance_obstacles(&mut obstacles, 0);

        assert_eq!(report, MotionReport { moved: 1, passed: 0, points: 0 });
        assert_eq!(obstacles[0].top, 22.5);
    }

    #[test]
    fn passing_obstacle_is_removed_and_reported() {
        let mut obstacles = vec![
            Obstacle::new(1, Lane::Left, ObstacleKind::Fast).at(480.0),
            Obstacle::new(2, Lane::Right, ObstacleKind::Normal).at(100.0),
        ];
        let report = advance_obstacles(&mut obstacles, 0);

        assert_eq!(report.passed, 1);
        assert_eq!(report.points, 40);
        assert_eq!(report.moved, 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
    }

    #[test]
    fn obstacle_landing_exactly_on_boundary_stays() {
        // 477.5 + 15 * 1.5 = 500.0, not past the boundary.
        let mut obstacles = vec![Obstacle::new(1, Lane::Left, ObstacleKind::Normal).at(477.5)];
        let report = advance_obstacles(&mut obstacles, 0);

        assert_eq!(report.passed, 0);
        assert_eq!(obstacles[0].top, 500.0);
    }

    #[test]
    fn whole_set_uses_start_of_step_score() {
        // Two obstacles pass; the third must still move at the score-0 rate.
        let mut obstacles = vec![
            Obstacle::new(1, Lane::Left, ObstacleKind::Fast).at(490.0),
            Obstacle::new(2, Lane::Center, ObstacleKind::Fast).at(490.0),
            Obstacle::new(3, Lane::Right, ObstacleKind::Normal),
        ];
        let report = advance_obstacles(&mut obstacles, 0);

        assert_eq!(report.points, 80);
        assert_eq!(obstacles[0].top, 22.5);
    }
}
