//! Reaction admission.
//!
//! Every reaction the platform reports passes through [`ReactionFilter`].
//! Only reactions from the session's author, on the session's message, using
//! one of the attached controls become input. Everything else leaves the
//! session untouched.

use std::sync::Arc;

use tracing::info;

use crate::session::SessionSlot;
use crate::types::{MessageId, Symbol, UserId};

/// Why a reaction was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoSession,
    UnknownControl,
    WrongUser,
    WrongMessage,
    /// The session loop already stopped reading input.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted {
        message: MessageId,
        user: UserId,
        symbol: Symbol,
    },
    Rejected(Rejection),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ReactionFilter {
    slot: Arc<SessionSlot>,
}

impl ReactionFilter {
    pub fn new(slot: Arc<SessionSlot>) -> Self {
        Self { slot }
    }

    /// Admit `symbol` as input if it qualifies.
    ///
    /// An admitted symbol is queued for the session loop and resets the
    /// inactivity timer. Removing the reaction from the message is left to
    /// the caller, which owns the transport.
    pub fn on_reaction(&self, symbol: &Symbol, user: UserId, message: MessageId) -> Admission {
        let verdict = self.slot.with_active(|session| {
            if !session.controls.contains(symbol) {
                return Err(Rejection::UnknownControl);
            }
            if session.author != user {
                return Err(Rejection::WrongUser);
            }
            if session.message != message {
                return Err(Rejection::WrongMessage);
            }
            if !session.push_input(symbol.clone()) {
                return Err(Rejection::Closed);
            }
            Ok(())
        });

        match verdict {
            None => {
                info!(%user, %message, "reaction with no active session");
                Admission::Rejected(Rejection::NoSession)
            }
            Some(Err(reason)) => Admission::Rejected(reason),
            Some(Ok(())) => Admission::Accepted {
                message,
                user,
                symbol: symbol.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ControlSet;
    use crate::session::{ActiveSession, SessionHandles};
    use crate::types::{arrow_controls, ChannelId, ARROW_UP};
    use std::time::Duration;
    use tokio::time::Instant;

    const AUTHOR: UserId = UserId(10);
    const MESSAGE: MessageId = MessageId(20);

    fn active() -> (ReactionFilter, SessionHandles) {
        let slot = Arc::new(SessionSlot::new());
        let controls = ControlSet::new(&arrow_controls()).unwrap();
        let (session, handles) = ActiveSession::open(AUTHOR, ChannelId(1), MESSAGE, controls);
        slot.activate(session);
        (ReactionFilter::new(slot), handles)
    }

    #[test]
    fn test_no_session_is_noop() {
        let filter = ReactionFilter::new(Arc::new(SessionSlot::new()));
        assert_eq!(
            filter.on_reaction(&Symbol::from(ARROW_UP), AUTHOR, MESSAGE),
            Admission::Rejected(Rejection::NoSession)
        );
    }

    #[test]
    fn test_starting_session_ignores_reactions() {
        let slot = Arc::new(SessionSlot::new());
        slot.reserve(AUTHOR, ChannelId(1)).unwrap();
        let filter = ReactionFilter::new(slot);
        assert_eq!(
            filter.on_reaction(&Symbol::from(ARROW_UP), AUTHOR, MESSAGE),
            Admission::Rejected(Rejection::NoSession)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejections_leave_queue_and_timer() {
        let (filter, mut handles) = active();
        handles.timer.touch();
        let before = handles.timer.last_input();
        tokio::time::advance(Duration::from_secs(2)).await;

        let up = Symbol::from(ARROW_UP);
        assert_eq!(
            filter.on_reaction(&up, UserId(99), MESSAGE),
            Admission::Rejected(Rejection::WrongUser)
        );
        assert_eq!(
            filter.on_reaction(&up, AUTHOR, MessageId(21)),
            Admission::Rejected(Rejection::WrongMessage)
        );
        assert_eq!(
            filter.on_reaction(&Symbol::from("🎉"), AUTHOR, MESSAGE),
            Admission::Rejected(Rejection::UnknownControl)
        );

        assert!(handles.input_rx.try_recv().is_err());
        assert_eq!(handles.timer.last_input(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admission_queues_and_touches() {
        let (filter, mut handles) = active();
        tokio::time::advance(Duration::from_secs(4)).await;
        let at = Instant::now();

        let admission = filter.on_reaction(&Symbol::from(ARROW_UP), AUTHOR, MESSAGE);
        assert!(admission.is_accepted());
        assert_eq!(handles.input_rx.try_recv().unwrap(), ARROW_UP);
        assert_eq!(handles.timer.last_input(), at);
    }

    #[test]
    fn test_closed_loop_rejects() {
        let (filter, handles) = active();
        drop(handles);
        assert_eq!(
            filter.on_reaction(&Symbol::from(ARROW_UP), AUTHOR, MESSAGE),
            Admission::Rejected(Rejection::Closed)
        );
    }
}
