//! Terminal input module.
//!
//! Maps `crossterm` key events to game actions and to the small set of
//! intents the menu, modal and name entry screens understand. Independent of
//! any rendering.

pub mod map;

pub use lane_dodge_types as types;

pub use map::{handle_key_event, is_back, is_interrupt, menu_key, should_quit, text_key, MenuKey, TextEdit};
