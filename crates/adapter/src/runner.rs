//! The session loop: post, attach controls, tick, re-render, tear down.
//!
//! Timing follows a fixed tick. Real-time games (`needs_input() == false`)
//! are updated and re-rendered every tick whether or not input arrived;
//! turn-based games only advance once input is queued, and queued input ends
//! the current tick wait early. The session ends when the game reports
//! `over` or when no qualifying input has arrived for longer than the game's
//! timeout.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::attach::attach_controls;
use crate::core::{render, ControlSet, Game, InputQueue, Screen};
use crate::pacing::{pause, PacingPolicy};
use crate::session::{ActiveSession, SessionHandles, SessionSlot};
use crate::transport::ChatTransport;
use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// Who started the session and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub author: UserId,
    pub channel: ChannelId,
}

/// Collaborators a session runs against.
#[derive(Debug)]
pub struct SessionContext<T> {
    pub transport: Arc<T>,
    pub slot: Arc<SessionSlot>,
    pub pacing: PacingPolicy,
}

impl<T> Clone for SessionContext<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            slot: Arc::clone(&self.slot),
            pacing: self.pacing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The game set its `over` flag.
    Finished,
    /// No qualifying input within the game's timeout.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub message: MessageId,
    pub reason: EndReason,
    /// Update cycles run, including the initial one.
    pub updates: u64,
}

/// Releases the slot when dropped, including on unwind.
struct SlotRelease<'a>(&'a SessionSlot);

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Run one game session to completion.
///
/// On return the game is left with `over` set. The slot is released even if
/// the game panics, so the bot accepts the next trigger. Transport failures
/// end the session and are returned.
pub async fn run_session<G, T>(
    ctx: &SessionContext<T>,
    game: &mut G,
    trigger: Trigger,
) -> Result<SessionEnd>
where
    G: Game + ?Sized,
    T: ChatTransport,
{
    let release = SlotRelease(&ctx.slot);
    let result = drive(ctx, game, trigger).await;
    game.set_over(true);
    drop(release);

    match &result {
        Ok(end) => info!(
            author = %trigger.author,
            message = %end.message,
            reason = ?end.reason,
            updates = end.updates,
            "session ended"
        ),
        Err(e) => warn!(author = %trigger.author, error = %e, "session aborted"),
    }
    result
}

struct Frame<'a, T> {
    transport: &'a T,
    message: MessageId,
    screen: Screen,
    updates: u64,
}

impl<T: ChatTransport> Frame<'_, T> {
    async fn step<G: Game + ?Sized>(&mut self, game: &mut G, input: &mut InputQueue) -> Result<()> {
        game.update(input);
        game.draw(&mut self.screen);
        input.clear();
        self.updates += 1;
        let text = render(&self.screen, &game.title(), &game.footer());
        self.transport.edit_message(self.message, &text).await
    }
}

async fn drive<G, T>(ctx: &SessionContext<T>, game: &mut G, trigger: Trigger) -> Result<SessionEnd>
where
    G: Game + ?Sized,
    T: ChatTransport,
{
    game.set_over(false);
    let controls = ControlSet::new(game.controls())?;
    let (width, height) = game.screen_size();
    let screen = Screen::new(width, height, game.background());

    pause(ctx.pacing.before_post).await;

    let text = render(&screen, &game.title(), &game.footer());
    let message = ctx.transport.send_message(trigger.channel, &text).await?;
    let (session, handles) =
        ActiveSession::open(trigger.author, trigger.channel, message, controls.clone());
    ctx.slot.activate(session);
    info!(author = %trigger.author, %message, "session started");

    let SessionHandles {
        mut input_rx,
        timer,
    } = handles;

    attach_controls(&*ctx.transport, message, &controls, &ctx.pacing).await?;

    let mut tick_start = Instant::now();
    timer.touch_at(tick_start);

    let mut frame = Frame {
        transport: &*ctx.transport,
        message,
        screen,
        updates: 0,
    };
    let mut input = InputQueue::new();
    frame.step(game, &mut input).await?;

    let reason = loop {
        drain(&mut input_rx, &mut input);

        if !game.needs_input() || !input.is_empty() {
            debug!(queued = input.len(), "update");
            frame.step(game, &mut input).await?;
        }

        if game.is_over() {
            break EndReason::Finished;
        }
        if timer.idle_for(Instant::now()) > game.timeout() {
            break EndReason::TimedOut;
        }

        let deadline = tick_start + game.tick();
        if game.needs_input() {
            tokio::select! {
                _ = sleep_until(deadline) => {}
                Some(sym) = input_rx.recv() => input.push_front(sym),
            }
        } else {
            sleep_until(deadline).await;
        }
        tick_start = Instant::now();
    };

    pause(ctx.pacing.before_teardown).await;
    ctx.transport.clear_reactions(message).await?;

    Ok(SessionEnd {
        message,
        reason,
        updates: frame.updates,
    })
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Symbol>, input: &mut InputQueue) {
    while let Ok(sym) = rx.try_recv() {
        input.push_front(sym);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{RecordingTransport, TransportCall};
    use crate::types::{ARROW_UP, STOP};
    use std::time::Duration;

    /// Counts updates; ends after `stop_after` updates when set.
    struct Counter {
        over: bool,
        needs_input: bool,
        updates: u32,
        stop_after: Option<u32>,
        panics: bool,
        controls: Vec<Symbol>,
    }

    impl Counter {
        fn new(needs_input: bool) -> Self {
            Self {
                over: true,
                needs_input,
                updates: 0,
                stop_after: None,
                panics: false,
                controls: vec![Symbol::from(ARROW_UP), Symbol::from(STOP)],
            }
        }
    }

    impl Game for Counter {
        fn is_over(&self) -> bool {
            self.over
        }
        fn set_over(&mut self, over: bool) {
            self.over = over;
        }
        fn needs_input(&self) -> bool {
            self.needs_input
        }
        fn tick(&self) -> Duration {
            Duration::from_secs(1)
        }
        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
        fn screen_size(&self) -> (usize, usize) {
            (2, 2)
        }
        fn background(&self) -> Symbol {
            Symbol::from(".")
        }
        fn title(&self) -> String {
            "T".to_string()
        }
        fn footer(&self) -> String {
            format!("{}", self.updates)
        }
        fn controls(&self) -> &[Symbol] {
            &self.controls
        }
        fn update(&mut self, input: &InputQueue) {
            assert!(!self.panics, "update failed");
            self.updates += 1;
            if input.contains(STOP) || self.stop_after.is_some_and(|n| self.updates >= n) {
                self.over = true;
            }
        }
        fn draw(&self, screen: &mut Screen) {
            screen.set(0, 0, "#");
        }
    }

    fn ctx() -> SessionContext<RecordingTransport> {
        SessionContext {
            transport: Arc::new(RecordingTransport::new()),
            slot: Arc::new(SessionSlot::new()),
            pacing: PacingPolicy::none(),
        }
    }

    const TRIGGER: Trigger = Trigger {
        author: UserId(1),
        channel: ChannelId(2),
    };

    #[tokio::test(start_paused = true)]
    async fn test_realtime_game_updates_every_tick() {
        let ctx = ctx();
        let mut game = Counter::new(false);
        game.stop_after = Some(4);

        let end = run_session(&ctx, &mut game, TRIGGER).await.unwrap();
        assert_eq!(end.reason, EndReason::Finished);
        assert_eq!(end.updates, 4);
        assert_eq!(ctx.transport.edit_count(end.message), 4);
        assert_eq!(
            ctx.transport.content(end.message).as_deref(),
            Some("T\n#.\n..\n\n4")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_based_game_times_out_without_input() {
        let ctx = ctx();
        let mut game = Counter::new(true);
        let start = Instant::now();

        let end = run_session(&ctx, &mut game, TRIGGER).await.unwrap();
        assert_eq!(end.reason, EndReason::TimedOut);
        // Only the initial update ran.
        assert_eq!(end.updates, 1);
        assert!(start.elapsed() > Duration::from_secs(5));
        assert!(game.is_over());
        assert!(ctx.slot.is_idle());
        assert!(ctx.transport.reactions(end.message).is_empty());
        assert!(matches!(
            ctx.transport.calls().last(),
            Some(TransportCall::ClearReactions { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_still_releases_slot() {
        let ctx = ctx();
        ctx.transport.set_failing(true);
        let mut game = Counter::new(true);

        assert!(run_session(&ctx, &mut game, TRIGGER).await.is_err());
        assert!(ctx.slot.is_idle());
        assert!(game.is_over());
    }

    #[tokio::test(start_paused = true)]
    async fn test_too_many_controls_is_an_error() {
        let ctx = ctx();
        let mut game = Counter::new(true);
        game.controls = (0..30).map(|i| Symbol::new(i.to_string())).collect();

        assert!(run_session(&ctx, &mut game, TRIGGER).await.is_err());
        assert!(ctx.transport.calls().is_empty());
        assert!(ctx.slot.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_game_still_releases_slot() {
        let ctx = ctx();
        ctx.slot.reserve(TRIGGER.author, TRIGGER.channel).unwrap();
        let mut game = Counter::new(true);
        game.panics = true;

        let task_ctx = ctx.clone();
        let joined = tokio::spawn(async move { run_session(&task_ctx, &mut game, TRIGGER).await }).await;
        assert!(joined.unwrap_err().is_panic());
        assert!(ctx.slot.is_idle());
        assert!(ctx.slot.reserve(UserId(3), ChannelId(2)).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_updates_are_one_tick_apart() {
        use std::sync::Mutex;

        struct Metronome {
            inner: Counter,
            times: Arc<Mutex<Vec<Instant>>>,
        }

        impl Game for Metronome {
            fn is_over(&self) -> bool {
                self.inner.is_over()
            }
            fn set_over(&mut self, over: bool) {
                self.inner.set_over(over)
            }
            fn needs_input(&self) -> bool {
                false
            }
            fn tick(&self) -> Duration {
                self.inner.tick()
            }
            fn timeout(&self) -> Duration {
                Duration::from_secs(60)
            }
            fn screen_size(&self) -> (usize, usize) {
                self.inner.screen_size()
            }
            fn background(&self) -> Symbol {
                self.inner.background()
            }
            fn title(&self) -> String {
                self.inner.title()
            }
            fn footer(&self) -> String {
                self.inner.footer()
            }
            fn controls(&self) -> &[Symbol] {
                self.inner.controls()
            }
            fn update(&mut self, input: &InputQueue) {
                self.times.lock().unwrap().push(Instant::now());
                self.inner.update(input)
            }
            fn draw(&self, screen: &mut Screen) {
                self.inner.draw(screen)
            }
        }

        let ctx = ctx();
        let times = Arc::new(Mutex::new(Vec::new()));
        let mut inner = Counter::new(false);
        inner.stop_after = Some(5);
        let mut game = Metronome {
            inner,
            times: Arc::clone(&times),
        };
        let start = Instant::now();

        run_session(&ctx, &mut game, TRIGGER).await.unwrap();

        let offsets: Vec<Duration> = times.lock().unwrap().iter().map(|t| *t - start).collect();
        // The initial update is followed straight away by the first loop update.
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::ZERO,
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3),
            ]
        );
    }
}
