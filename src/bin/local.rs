//! Terminal runner.
//!
//! Plays the demo game in the terminal. Keys become reactions from a single
//! local player on the current game message.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use gamecord::adapter::{Bot, BotConfig, BotEvent, IncomingMessage, PacingPolicy, ReactionAdd};
use gamecord::core::{Game, Snake, Wander};
use gamecord::input::{is_restart, key_to_symbol, should_quit};
use gamecord::term::{compose, TerminalRenderer, TerminalTransport};
use gamecord::types::{ChannelId, UserId};
use gamecord::{clock_seed, GameChoice};

const PLAYER: UserId = UserId(1);
const CHANNEL: ChannelId = ChannelId(1);

#[tokio::main]
async fn main() -> Result<()> {
    // Logs would draw over the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "off".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let choice = GameChoice::from_env();
    let config = BotConfig::from_env(choice.name()).with_pacing(PacingPolicy::none());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = match choice {
        GameChoice::Wander => play(&mut term, Wander::new(clock_seed()), config).await,
        GameChoice::Snake => play(&mut term, Snake::new(clock_seed()), config).await,
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

async fn play<G: Game + 'static>(term: &mut TerminalRenderer, game: G, config: BotConfig) -> Result<()> {
    let controls = game.controls().to_vec();
    let trigger = config.activity();

    let transport = Arc::new(TerminalTransport::new());
    let mut view_rx = transport.subscribe();

    let (event_tx, event_rx) = mpsc::channel(config.gateway.max_pending_events.max(1));
    let bot = Bot::new(game, Arc::clone(&transport), config);
    let bot_task = tokio::spawn(bot.run(event_rx));

    let start = BotEvent::Message(IncomingMessage {
        channel: CHANNEL,
        author: PLAYER,
        content: trigger,
    });
    event_tx.send(BotEvent::Ready).await?;
    event_tx.send(start.clone()).await?;

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || read_terminal(key_tx));

    term.draw_lines(compose(&view_rx.borrow_and_update()))?;

    loop {
        tokio::select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let lines = compose(&view_rx.borrow_and_update());
                term.draw_lines(lines)?;
            }
            ev = key_rx.recv() => {
                let Some(ev) = ev else { break };
                match ev {
                    Event::Resize(_, _) => {
                        term.invalidate();
                        term.draw_lines(compose(&view_rx.borrow()))?;
                    }
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if should_quit(key) {
                            break;
                        }
                        if is_restart(key) {
                            event_tx.send(start.clone()).await?;
                            continue;
                        }
                        let (Some(symbol), Some(message)) =
                            (key_to_symbol(key, &controls), transport.current_message())
                        else {
                            continue;
                        };
                        event_tx
                            .send(BotEvent::Reaction(ReactionAdd {
                                message,
                                user: PLAYER,
                                emoji: symbol,
                            }))
                            .await?;
                    }
                    _ => {}
                }
            }
        }
    }

    drop(key_rx);
    drop(event_tx);
    bot_task.abort();
    reader.await??;
    Ok(())
}

/// Forward terminal events until the receiver goes away.
fn read_terminal(tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    while !tx.is_closed() {
        if event::poll(Duration::from_millis(100))? {
            if tx.send(event::read()?).is_err() {
                break;
            }
        }
    }
    Ok(())
}
