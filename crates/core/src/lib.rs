//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and run state management.
//! It has **zero dependencies** on UI, networking, timers or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical obstacle feeds
//! - **Testable**: Every transition is a plain method call
//! - **Portable**: Can run in any environment (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`obstacle`]: the falling obstacle entity and its geometry predicates
//! - [`feed`]: rolls new obstacles (lane and kind)
//! - [`motion`]: the motion & scoring step with its difficulty ramp
//! - [`collision`]: lane + collision band test
//! - [`game_state`]: [`RunState`], the single owner of lane, obstacles, score and game-over latch
//! - [`rng`]: seedable LCG
//! - [`snapshot`]: read-only copies for views
//!
//! # Example
//!
//! ```
//! use lane_dodge_core::{Obstacle, RunState};
//! use lane_dodge_types::{GameAction, Lane, ObstacleKind};
//!
//! let mut run = RunState::new(12345);
//!
//! // An obstacle about to reach the car in the center lane.
//! run.insert_obstacle(Obstacle::new(0, Lane::Center, ObstacleKind::Normal).at(430.0));
//!
//! // Dodge it, then let it pass.
//! run.apply_action(GameAction::MoveLeft);
//! for _ in 0..4 {
//!     run.tick();
//! }
//!
//! assert!(!run.is_over());
//! assert_eq!(run.score(), 10);
//! ```
//!
//! # Timing
//!
//! The run does not own any clock. A driver calls
//! [`RunState::spawn_obstacle`] every 2000ms and [`RunState::tick`] every 100ms
//! (see the engine crate's scheduler).

pub mod collision;
pub mod feed;
pub mod game_state;
pub mod motion;
pub mod obstacle;
pub mod rng;
pub mod snapshot;

pub use lane_dodge_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, find_collision};
pub use feed::roll_obstacle;
pub use game_state::{RunState, TickOutcome};
pub use motion::{advance_obstacles, speed_multiplier, MotionReport};
pub use obstacle::Obstacle;
pub use rng::SimpleRng;
pub use snapshot::RunSnapshot;
