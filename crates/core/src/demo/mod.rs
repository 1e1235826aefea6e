//! Playable demo games.

pub mod snake;
pub mod wander;

pub use snake::Snake;
pub use wander::Wander;
