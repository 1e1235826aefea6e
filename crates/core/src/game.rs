//! The game contract the session loop drives.

use std::time::Duration;

use crate::controls::InputQueue;
use crate::screen::Screen;
use crate::types::Symbol;

/// A reaction-driven text game.
///
/// While a session is running the session loop is the only owner: it resets
/// `over`, calls [`Game::update`] and [`Game::draw`], and renders the screen
/// with the current [`Game::title`] and [`Game::footer`].
pub trait Game: Send {
    fn is_over(&self) -> bool;

    fn set_over(&mut self, over: bool);

    /// If true, `update` only runs once input is queued (turn-based);
    /// otherwise it runs every tick (real-time).
    fn needs_input(&self) -> bool;

    /// Interval between loop iterations.
    fn tick(&self) -> Duration;

    /// Inactivity window measured from the last qualifying input.
    fn timeout(&self) -> Duration;

    /// `(width, height)` of the screen.
    fn screen_size(&self) -> (usize, usize);

    fn background(&self) -> Symbol;

    fn title(&self) -> String;

    fn footer(&self) -> String;

    /// Reactions attached to the game message, in order.
    fn controls(&self) -> &[Symbol];

    /// Extra command names that also start the game.
    fn aliases(&self) -> &[String] {
        &[]
    }

    /// Extensions the bot loads on startup.
    fn extensions(&self) -> &[String] {
        &[]
    }

    /// Advance one step. `input` is newest first and is cleared afterwards.
    fn update(&mut self, input: &InputQueue);

    /// Paint the current state onto `screen`.
    fn draw(&self, screen: &mut Screen);
}
