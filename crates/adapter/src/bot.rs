//! Bot: command dispatch, presence and reaction routing for one game.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

use crate::config::BotConfig;
use crate::core::Game;
use crate::extensions::ExtensionRegistry;
use crate::filter::{Admission, ReactionFilter};
use crate::runner::{run_session, SessionContext, SessionEnd, Trigger};
use crate::session::SessionSlot;
use crate::transport::{ChatTransport, PresenceStatus};
use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// A message seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel: ChannelId,
    pub author: UserId,
    pub content: String,
}

/// A reaction added by some user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionAdd {
    pub message: MessageId,
    pub user: UserId,
    pub emoji: Symbol,
}

/// Platform events the bot reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    Ready,
    Message(IncomingMessage),
    Reaction(ReactionAdd),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("a session for user {author} is already running")]
    SessionActive { author: UserId },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub type SessionTask = JoinHandle<anyhow::Result<SessionEnd>>;

pub struct Bot<G, T> {
    config: BotConfig,
    game: Arc<Mutex<G>>,
    aliases: Vec<String>,
    extensions: Vec<String>,
    registry: ExtensionRegistry,
    transport: Arc<T>,
    slot: Arc<SessionSlot>,
    filter: ReactionFilter,
}

impl<G, T> Bot<G, T>
where
    G: Game + 'static,
    T: ChatTransport,
{
    pub fn new(game: G, transport: Arc<T>, config: BotConfig) -> Self {
        let aliases = game.aliases().to_vec();
        let extensions = game.extensions().to_vec();
        let slot = Arc::new(SessionSlot::new());
        Self {
            config,
            game: Arc::new(Mutex::new(game)),
            aliases,
            extensions,
            registry: ExtensionRegistry::new(),
            transport,
            filter: ReactionFilter::new(Arc::clone(&slot)),
            slot,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn slot(&self) -> &Arc<SessionSlot> {
        &self.slot
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Load extensions and announce presence.
    pub async fn on_ready(&mut self) -> anyhow::Result<()> {
        for name in &self.extensions {
            match self.registry.load(name) {
                Ok(()) => info!(extension = %name, "extension loaded"),
                Err(e) => warn!(error = %e, "extension not loaded"),
            }
        }

        let activity = self.config.activity();
        self.transport
            .set_presence(&activity, PresenceStatus::Online)
            .await?;
        info!(%activity, "ready for play");
        Ok(())
    }

    /// The command word of `content`, if it carries the prefix.
    fn command<'a>(&self, content: &'a str) -> Option<&'a str> {
        let rest = content.strip_prefix(self.config.prefix.as_str())?;
        rest.split_whitespace().next()
    }

    fn is_trigger(&self, command: &str) -> bool {
        command == self.config.name || self.aliases.iter().any(|a| a == command)
    }

    /// Dispatch one message.
    ///
    /// Returns the spawned session task when the message started a game.
    pub fn on_message(&self, msg: &IncomingMessage) -> Result<Option<SessionTask>, DispatchError> {
        let Some(command) = self.command(&msg.content) else {
            return Ok(None);
        };
        if !self.is_trigger(command) {
            return Err(DispatchError::UnknownCommand(command.to_string()));
        }

        self.slot
            .reserve(msg.author, msg.channel)
            .map_err(|busy| DispatchError::SessionActive {
                author: busy.author,
            })?;

        let trigger = Trigger {
            author: msg.author,
            channel: msg.channel,
        };
        let ctx = SessionContext {
            transport: Arc::clone(&self.transport),
            slot: Arc::clone(&self.slot),
            pacing: self.config.pacing,
        };
        let game = Arc::clone(&self.game);

        info!(author = %msg.author, channel = %msg.channel, "starting session");
        Ok(Some(tokio::spawn(async move {
            let mut game = game.lock_owned().await;
            run_session(&ctx, &mut *game, trigger).await
        })))
    }

    /// Dispatch a message, logging instead of returning errors.
    pub fn handle_message(&self, msg: &IncomingMessage) -> Option<SessionTask> {
        match self.on_message(msg) {
            Ok(task) => task,
            Err(DispatchError::UnknownCommand(cmd)) => {
                trace!(command = %cmd, "ignoring unknown command");
                None
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                None
            }
        }
    }

    /// Route a reaction through the filter, removing admitted reactions.
    pub async fn on_reaction(&self, reaction: &ReactionAdd) -> Admission {
        let admission = self
            .filter
            .on_reaction(&reaction.emoji, reaction.user, reaction.message);

        if admission.is_accepted() {
            if let Err(e) = self
                .transport
                .remove_reaction(reaction.message, &reaction.emoji, reaction.user)
                .await
            {
                warn!(error = %e, message = %reaction.message, "failed to remove reaction");
            }
        }
        admission
    }

    /// Consume events until the channel closes.
    pub async fn run(mut self, mut events: mpsc::Receiver<BotEvent>) -> anyhow::Result<()> {
        while let Some(event) = events.recv().await {
            match event {
                BotEvent::Ready => self.on_ready().await?,
                BotEvent::Message(msg) => {
                    self.handle_message(&msg);
                }
                BotEvent::Reaction(reaction) => {
                    self.on_reaction(&reaction).await;
                }
            }
        }
        info!("event stream closed");
        Ok(())
    }
}
