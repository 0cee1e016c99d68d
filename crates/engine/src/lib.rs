//! Engine crate - timing and session orchestration around the pure core.
//!
//! - [`scheduler`]: cancellable periodic tasks on a virtual clock
//! - [`session`]: [`GameSession`], which owns one player's run and its timers
//!
//! ```
//! use lane_dodge_engine::GameSession;
//! use lane_dodge_types::{PlayerName, SPAWN_PERIOD_MS};
//!
//! let mut session = GameSession::new(PlayerName::parse("Ana").unwrap(), 7);
//! let report = session.advance(SPAWN_PERIOD_MS);
//! assert_eq!(report.spawned, 1);
//! ```

pub mod scheduler;
pub mod session;

pub use lane_dodge_core as core;
pub use lane_dodge_types as types;

pub use scheduler::{Scheduler, TaskId};
pub use session::{FinishedRun, GameSession, SessionReport};
