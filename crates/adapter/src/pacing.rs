//! Courtesy delays around platform calls.
//!
//! Rate-limited platforms throttle bursts of posts and reactions. The delays
//! are not needed for correctness, so transports without limits can use
//! [`PacingPolicy::none`].

use std::time::Duration;

use crate::types::DEFAULT_PACING_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Before the first post of a session.
    pub before_post: Duration,
    /// Before each reaction is attached.
    pub between_reactions: Duration,
    /// Before reactions are cleared at the end of a session.
    pub before_teardown: Duration,
}

impl PacingPolicy {
    /// The same delay everywhere.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            before_post: delay,
            between_reactions: delay,
            before_teardown: delay,
        }
    }

    pub fn courteous() -> Self {
        Self::uniform(Duration::from_millis(DEFAULT_PACING_MS))
    }

    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::courteous()
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
