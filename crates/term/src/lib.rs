//! Terminal rendering for the lane dodging game.
//!
//! Views draw into a plain [`FrameBuffer`]; the [`TerminalRenderer`] diffs
//! consecutive frames and flushes only changed cells through crossterm.
//! Nothing here owns game state.

pub mod fb;
pub mod renderer;
pub mod screens;
pub mod track_view;

pub use lane_dodge_core as core;
pub use lane_dodge_leaderboard as leaderboard;
pub use lane_dodge_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{render_menu, render_modal, render_name_entry, render_scoreboard};
pub use track_view::{TrackView, Viewport};
