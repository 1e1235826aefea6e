//! Core game module - screens, rendering and the game contract
//!
//! This crate holds everything that does not touch the chat platform:
//!
//! - **Deterministic**: demo games are seeded, so the same seed replays the same game
//! - **Testable**: pure functions and plain data, no I/O
//! - **Portable**: the same games run through the TCP gateway or the local terminal
//!
//! # Module Structure
//!
//! - [`game`]: the [`Game`] trait the session loop drives
//! - [`screen`]: fixed-size symbol grid games draw into
//! - [`render`]: turns a screen into a message body
//! - [`controls`]: accepted control alphabet and the pending input queue
//! - [`rng`]: seeded LCG used by the demo games
//! - [`demo`]: [`Wander`] (turn-based) and [`Snake`] (real-time)
//!
//! # Example
//!
//! ```
//! use gamecord_core::{render, Game, InputQueue, Screen, Wander};
//!
//! let mut game = Wander::new(7);
//! game.set_over(false);
//!
//! let (w, h) = game.screen_size();
//! let mut screen = Screen::new(w, h, game.background());
//! game.update(&InputQueue::new());
//! game.draw(&mut screen);
//!
//! let text = render(&screen, &game.title(), &game.footer());
//! assert!(text.starts_with("**Wander**\n"));
//! ```

pub mod controls;
pub mod demo;
pub mod game;
pub mod render;
pub mod rng;
pub mod screen;

pub use gamecord_types as types;

pub use controls::{ControlSet, ControlSetError, InputQueue};
pub use demo::{Snake, Wander};
pub use game::Game;
pub use render::render;
pub use rng::SimpleRng;
pub use screen::Screen;
