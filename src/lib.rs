//! Lane Dodge (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the [`app`]
//! screen flow shared by the terminal binary and its tests.

pub mod app;

pub use lane_dodge_core as core;
pub use lane_dodge_engine as engine;
pub use lane_dodge_input as input;
pub use lane_dodge_leaderboard as leaderboard;
pub use lane_dodge_term as term;
pub use lane_dodge_types as types;
