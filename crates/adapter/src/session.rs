//! Session bookkeeping: the single table a bot instance runs.
//!
//! The slot moves `Idle -> Starting -> Active -> Idle`. A trigger reserves
//! the slot before anything is posted, so a second trigger during startup is
//! rejected just like one during play.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::core::ControlSet;
use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// Time of the last qualifying input, shared between the reaction filter
/// (writer) and the session loop (reader).
#[derive(Debug)]
pub struct InactivityTimer {
    epoch: Instant,
    last_ms: AtomicU64,
}

impl InactivityTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(epoch: Instant) -> Self {
        Self {
            epoch,
            last_ms: AtomicU64::new(0),
        }
    }

    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    pub fn touch_at(&self, now: Instant) {
        let ms = now.saturating_duration_since(self.epoch).as_millis() as u64;
        self.last_ms.store(ms, Ordering::Release);
    }

    pub fn last_input(&self) -> Instant {
        self.epoch + Duration::from_millis(self.last_ms.load(Ordering::Acquire))
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_input())
    }
}

impl Default for InactivityTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// The running session as the reaction filter sees it.
#[derive(Debug)]
pub struct ActiveSession {
    pub author: UserId,
    pub channel: ChannelId,
    pub message: MessageId,
    pub controls: ControlSet,
    timer: Arc<InactivityTimer>,
    input_tx: mpsc::UnboundedSender<Symbol>,
}

/// Loop-side ends of an [`ActiveSession`].
#[derive(Debug)]
pub struct SessionHandles {
    pub input_rx: mpsc::UnboundedReceiver<Symbol>,
    pub timer: Arc<InactivityTimer>,
}

impl ActiveSession {
    pub fn open(
        author: UserId,
        channel: ChannelId,
        message: MessageId,
        controls: ControlSet,
    ) -> (Self, SessionHandles) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let timer = Arc::new(InactivityTimer::new());
        let session = Self {
            author,
            channel,
            message,
            controls,
            timer: Arc::clone(&timer),
            input_tx,
        };
        (session, SessionHandles { input_rx, timer })
    }

    /// Queue an input and reset the inactivity timer.
    ///
    /// Returns false if the loop has already dropped its receiver.
    pub(crate) fn push_input(&self, sym: Symbol) -> bool {
        if self.input_tx.send(sym).is_err() {
            return false;
        }
        self.timer.touch();
        true
    }

    pub fn timer(&self) -> &InactivityTimer {
        &self.timer
    }
}

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A trigger was accepted; the game message is not posted yet.
    Starting { author: UserId, channel: ChannelId },
    Active(ActiveSession),
}

/// Returned by [`SessionSlot::reserve`] when a session already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBusy {
    pub author: UserId,
}

/// Summary of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub author: UserId,
    pub channel: ChannelId,
    pub message: Option<MessageId>,
}

/// Process-wide holder of at most one session.
#[derive(Debug, Default)]
pub struct SessionSlot {
    state: Mutex<SessionState>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim the slot for a new session.
    pub fn reserve(&self, author: UserId, channel: ChannelId) -> Result<(), SlotBusy> {
        let mut state = self.lock();
        let holder = match &*state {
            SessionState::Idle => None,
            SessionState::Starting { author, .. } => Some(*author),
            SessionState::Active(s) => Some(s.author),
        };
        if let Some(holder) = holder {
            return Err(SlotBusy { author: holder });
        }
        *state = SessionState::Starting { author, channel };
        Ok(())
    }

    /// Make `session` the one reactions are matched against.
    pub fn activate(&self, session: ActiveSession) {
        *self.lock() = SessionState::Active(session);
    }

    /// End the session. Dropping the active session closes its input channel.
    pub fn release(&self) {
        *self.lock() = SessionState::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(&*self.lock(), SessionState::Idle)
    }

    pub fn info(&self) -> Option<SessionInfo> {
        match &*self.lock() {
            SessionState::Idle => None,
            SessionState::Starting { author, channel } => Some(SessionInfo {
                author: *author,
                channel: *channel,
                message: None,
            }),
            SessionState::Active(s) => Some(SessionInfo {
                author: s.author,
                channel: s.channel,
                message: Some(s.message),
            }),
        }
    }

    /// Run `f` against the active session, if there is one.
    pub fn with_active<R>(&self, f: impl FnOnce(&ActiveSession) -> R) -> Option<R> {
        match &*self.lock() {
            SessionState::Active(s) => Some(f(s)),
            _ => None,
        }
    }
}
