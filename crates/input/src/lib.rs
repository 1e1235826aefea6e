//! Terminal input module.
//!
//! Maps `crossterm` key events onto a game's reaction controls so a game can
//! be played locally without a chat platform.

pub mod map;

pub use gamecord_types as types;

pub use map::{is_restart, key_to_symbol, should_quit};
