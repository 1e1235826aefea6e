//! gamecord (workspace facade crate).
//!
//! Re-exports the member crates under `gamecord::{adapter,core,input,term,types}`
//! and picks the demo game the binaries serve.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

pub use gamecord_adapter as adapter;
pub use gamecord_core as core;
pub use gamecord_input as input;
pub use gamecord_term as term;
pub use gamecord_types as types;

/// Demo game selected with `GAMECORD_GAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameChoice {
    #[default]
    Wander,
    Snake,
}

impl GameChoice {
    /// Command name the game is started with by default.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wander => "wander",
            Self::Snake => "snake",
        }
    }

    /// Read `GAMECORD_GAME`, defaulting to wander when unset or unknown.
    pub fn from_env() -> Self {
        std::env::var("GAMECORD_GAME")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for GameChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wander" => Ok(Self::Wander),
            "snake" => Ok(Self::Snake),
            other => Err(format!("unknown game `{other}`")),
        }
    }
}

/// Seed for a fresh game, taken from the clock.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_choice_parses_names() {
        assert_eq!("Snake".parse::<GameChoice>(), Ok(GameChoice::Snake));
        assert_eq!(" wander ".parse::<GameChoice>(), Ok(GameChoice::Wander));
        assert!("chess".parse::<GameChoice>().is_err());
        assert_eq!(GameChoice::default().name(), "wander");
    }
}
