//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, leaderboard protocol).
//!
//! # Track Geometry
//!
//! The track is a fixed logical rectangle split into three lanes:
//!
//! - **Width**: 360 units (three lanes of 120)
//! - **Height**: 500 units; an obstacle whose top passes 500 has left the track
//! - **Collision band**: the open interval (440, 500), the vertical extent of the car
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds (one game time unit is 1000ms):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_PERIOD_MS` | 2000 | One new obstacle per period |
//! | `MOTION_TICK_MS` | 100 | Obstacles advance once per tick |
//! | `FRAME_MS` | 16 | Terminal input poll / render interval |
//!
//! # Obstacles
//!
//! | Kind | Speed (units/tick) | Points | Chance |
//! |------|--------------------|--------|--------|
//! | Normal | 15 | 10 | 70% |
//! | Fast | 25 | 40 | 30% |
//!
//! Effective speed ramps with the score: `speed * (1.5 + score / 1000)`.
//!
//! # Examples
//!
//! ```
//! use lane_dodge_types::{Lane, ObstacleKind, PlayerName};
//!
//! let lane = Lane::Center;
//! assert_eq!(lane.left(), Some(Lane::Left));
//! assert_eq!(Lane::Right.right(), None);
//!
//! assert_eq!(ObstacleKind::Fast.points(), 40);
//!
//! assert!(PlayerName::parse("   ").is_none());
//! assert_eq!(PlayerName::parse(" Ana ").unwrap().as_str(), "Ana");
//! ```

/// Number of lanes on the track
pub const LANE_COUNT: u8 = 3;

/// Logical track width
pub const TRACK_WIDTH: u16 = 360;

/// Logical track height; the bottom boundary for passing obstacles
pub const TRACK_HEIGHT: f32 = 500.0;

/// Car (and obstacle) sprite width
pub const CAR_WIDTH: u16 = 40;

/// Car (and obstacle) sprite height
pub const CAR_HEIGHT: u16 = 60;

/// Lower (exclusive) edge of the collision band
pub const COLLISION_BAND_TOP: f32 = 440.0;

/// Upper (exclusive) edge of the collision band
pub const COLLISION_BAND_BOTTOM: f32 = 500.0;

/// Obstacle feed period (2 time units)
pub const SPAWN_PERIOD_MS: u32 = 2000;

/// Motion step period (0.1 time units)
pub const MOTION_TICK_MS: u32 = 100;

/// Terminal frame interval (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Chance of spawning a fast obstacle, in thousandths (0.3)
pub const FAST_CHANCE_PERMILLE: u32 = 300;

/// Base speed multiplier applied to every obstacle
pub const BASE_SPEED_MULTIPLIER: f32 = 1.5;

/// Score divisor for the difficulty ramp (`+ score / 1000`)
pub const SCORE_RAMP_DIVISOR: f32 = 1000.0;

/// Number of records shown on the leaderboard
pub const LEADERBOARD_LIMIT: usize = 10;

/// Document collection holding score records
pub const SCORES_COLLECTION: &str = "scores";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_band_sits_on_the_bottom_boundary() {
        assert_eq!(COLLISION_BAND_BOTTOM, TRACK_HEIGHT);
        assert_eq!(
            COLLISION_BAND_BOTTOM - COLLISION_BAND_TOP,
            CAR_HEIGHT as f32
        );
    }

    #[test]
    fn lane_from_index_rejects_out_of_range() {
        assert_eq!(Lane::from_index(0), Some(Lane::Left));
        assert_eq!(Lane::from_index(1), Some(Lane::Center));
        assert_eq!(Lane::from_index(2), Some(Lane::Right));
        assert_eq!(Lane::from_index(3), None);
    }

    #[test]
    fn lane_steps_clamp_at_edges() {
        assert_eq!(Lane::Left.left(), None);
        assert_eq!(Lane::Left.right(), Some(Lane::Center));
        assert_eq!(Lane::Right.left(), Some(Lane::Center));
        assert_eq!(Lane::Right.right(), None);
    }

    #[test]
    fn obstacle_kind_tables() {
        assert_eq!(ObstacleKind::Normal.speed(), 15.0);
        assert_eq!(ObstacleKind::Normal.points(), 10);
        assert_eq!(ObstacleKind::Fast.speed(), 25.0);
        assert_eq!(ObstacleKind::Fast.points(), 40);
    }

    #[test]
    fn player_name_trims_and_rejects_blank() {
        assert!(PlayerName::parse("").is_none());
        assert!(PlayerName::parse(" \t\n").is_none());
        let name = PlayerName::parse("  Ana  ").unwrap();
        assert_eq!(name.as_str(), "Ana");
        assert_eq!(name.to_string(), "Ana");
    }
}

/// One of the three fixed lanes
///
/// - **Left**: index 0
/// - **Center**: index 1 (spawn lane of the player)
/// - **Right**: index 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    /// All lanes, left to right.
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane for a 0-based index, or `None` outside `0..3`.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Center),
            2 => Some(Lane::Right),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    /// The lane one step to the left, if any.
    pub fn left(&self) -> Option<Self> {
        match self {
            Lane::Left => None,
            Lane::Center => Some(Lane::Left),
            Lane::Right => Some(Lane::Center),
        }
    }

    /// The lane one step to the right, if any.
    pub fn right(&self) -> Option<Self> {
        match self {
            Lane::Left => Some(Lane::Center),
            Lane::Center => Some(Lane::Right),
            Lane::Right => None,
        }
    }
}

/// Obstacle variants
///
/// Fast obstacles move quicker and are worth more when they pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Normal,
    Fast,
}

impl ObstacleKind {
    /// Base speed in track units per motion tick
    pub fn speed(&self) -> f32 {
        match self {
            ObstacleKind::Normal => 15.0,
            ObstacleKind::Fast => 25.0,
        }
    }

    /// Points credited when the obstacle passes the bottom boundary
    pub fn points(&self) -> u32 {
        match self {
            ObstacleKind::Normal => 10,
            ObstacleKind::Fast => 40,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Normal => "normal",
            ObstacleKind::Fast => "fast",
        }
    }
}

/// Player actions that can be applied to a run
///
/// The same actions are produced by the terminal key map and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the car one lane left
    MoveLeft,
    /// Shift the car one lane right
    MoveRight,
    /// Start a new run after game over
    Restart,
}

/// Name the player enters before a session starts
///
/// Always non-empty and already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// Build a name from raw input, or `None` if it is blank after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
