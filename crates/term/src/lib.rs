//! Terminal front end.
//!
//! Plays a game locally: [`TerminalTransport`] stands in for the chat
//! platform and keeps the single visible message, and [`TerminalRenderer`]
//! flushes the composed view to the terminal, redrawing only changed lines.

pub mod renderer;
pub mod transport;

pub use gamecord_adapter as adapter;
pub use gamecord_core as core;
pub use gamecord_types as types;

pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use transport::{compose, TerminalTransport, View};
