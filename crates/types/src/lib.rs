//! Core types module - shared identifiers, symbols and constants
//!
//! This module defines the fundamental types used throughout the bot.
//! All types are plain data with no external dependencies, so they can be
//! used in any context (game logic, session loop, gateway protocol, terminal).
//!
//! # Identities
//!
//! The chat platform is modelled with three opaque numeric identities:
//!
//! - [`UserId`]: the author of a message or reaction
//! - [`MessageId`]: a message posted by the bot
//! - [`ChannelId`]: where a message was posted
//!
//! # Symbols
//!
//! A [`Symbol`] is one rendered cell of a screen, or one reaction control.
//! Emoji are frequently several code points long, so a symbol is a short
//! string rather than a `char`.
//!
//! # Pacing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_PACING_MS` | 250 | Courtesy delay around posting and reacting |
//! | `MAX_CONTROLS` | 20 | Reactions a single message may carry |
//!
//! # Examples
//!
//! ```
//! use gamecord_types::{Symbol, UserId, ARROW_UP};
//!
//! let up = Symbol::from(ARROW_UP);
//! assert_eq!(up.as_str(), "⬆️");
//! assert_eq!(up, Symbol::new("⬆️"));
//!
//! let user = UserId(42);
//! assert_eq!(user.to_string(), "42");
//! ```

use std::fmt;

/// Courtesy delay applied around posting and reacting, in milliseconds.
pub const DEFAULT_PACING_MS: u64 = 250;

/// Maximum number of distinct reactions one message can carry.
pub const MAX_CONTROLS: usize = 20;

pub const ARROW_UP: &str = "⬆️";
pub const ARROW_DOWN: &str = "⬇️";
pub const ARROW_LEFT: &str = "⬅️";
pub const ARROW_RIGHT: &str = "➡️";
pub const RECORD: &str = "⏺️";
pub const STOP: &str = "⏹️";

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }
    };
}

id_type!(
    /// Identity of a platform user.
    UserId
);
id_type!(
    /// Identity of a message posted on the platform.
    MessageId
);
id_type!(
    /// Identity of a channel messages are posted in.
    ChannelId
);

/// A screen cell or reaction control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The four arrow controls in their conventional attachment order.
pub fn arrow_controls() -> Vec<Symbol> {
    [ARROW_LEFT, ARROW_UP, ARROW_DOWN, ARROW_RIGHT]
        .into_iter()
        .map(Symbol::from)
        .collect()
}
