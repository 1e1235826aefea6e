//! Chat platform seam.
//!
//! The session loop only talks to the platform through [`ChatTransport`].
//! Every call is awaited in order, so an edit issued after a post always
//! reaches the transport after it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// Online status announced together with the presence activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresenceStatus {
    Online,
    Idle,
}

/// Operations the bot needs from a chat platform.
pub trait ChatTransport: Send + Sync + 'static {
    /// Post a new message and return its identity.
    fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> impl Future<Output = Result<MessageId>> + Send;

    fn edit_message(
        &self,
        message: MessageId,
        content: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Attach a reaction as the bot itself.
    fn add_reaction(
        &self,
        message: MessageId,
        emoji: &Symbol,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Remove one user's reaction.
    fn remove_reaction(
        &self,
        message: MessageId,
        emoji: &Symbol,
        user: UserId,
    ) -> impl Future<Output = Result<()>> + Send;

    fn clear_reactions(&self, message: MessageId) -> impl Future<Output = Result<()>> + Send;

    fn set_presence(
        &self,
        activity: &str,
        status: PresenceStatus,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// One call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send {
        channel: ChannelId,
        id: MessageId,
        content: String,
    },
    Edit {
        id: MessageId,
        content: String,
    },
    AddReaction {
        message: MessageId,
        emoji: Symbol,
    },
    RemoveReaction {
        message: MessageId,
        emoji: Symbol,
        user: UserId,
    },
    ClearReactions {
        message: MessageId,
    },
    Presence {
        activity: String,
        status: PresenceStatus,
    },
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<TransportCall>,
    contents: HashMap<MessageId, String>,
    reactions: HashMap<MessageId, Vec<Symbol>>,
}

/// In-memory transport that records every call.
///
/// Used headless and in tests; [`RecordingTransport::set_failing`] makes all
/// subsequent calls fail.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    next_id: AtomicU64,
    failing: AtomicBool,
    inner: Mutex<Recorded>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.lock().calls.clone()
    }

    /// Latest content of a message.
    pub fn content(&self, message: MessageId) -> Option<String> {
        self.lock().contents.get(&message).cloned()
    }

    /// Reactions the bot currently has attached to a message.
    pub fn reactions(&self, message: MessageId) -> Vec<Symbol> {
        self.lock()
            .reactions
            .get(&message)
            .cloned()
            .unwrap_or_default()
    }

    pub fn edit_count(&self, message: MessageId) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Edit { id, .. } if *id == message))
            .count()
    }

    /// Most recently posted message.
    pub fn last_message(&self) -> Option<MessageId> {
        self.lock().calls.iter().rev().find_map(|c| match c {
            TransportCall::Send { id, .. } => Some(*id),
            _ => None,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("transport unavailable");
        }
        Ok(())
    }
}

impl ChatTransport for RecordingTransport {
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<MessageId> {
        self.check()?;
        let id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut inner = self.lock();
        inner.contents.insert(id, content.to_string());
        inner.calls.push(TransportCall::Send {
            channel,
            id,
            content: content.to_string(),
        });
        Ok(id)
    }

    async fn edit_message(&self, message: MessageId, content: &str) -> Result<()> {
        self.check()?;
        let mut inner = self.lock();
        inner.contents.insert(message, content.to_string());
        inner.calls.push(TransportCall::Edit {
            id: message,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn add_reaction(&self, message: MessageId, emoji: &Symbol) -> Result<()> {
        self.check()?;
        let mut inner = self.lock();
        let attached = inner.reactions.entry(message).or_default();
        if !attached.contains(emoji) {
            attached.push(emoji.clone());
        }
        inner.calls.push(TransportCall::AddReaction {
            message,
            emoji: emoji.clone(),
        });
        Ok(())
    }

    async fn remove_reaction(&self, message: MessageId, emoji: &Symbol, user: UserId) -> Result<()> {
        self.check()?;
        self.lock().calls.push(TransportCall::RemoveReaction {
            message,
            emoji: emoji.clone(),
            user,
        });
        Ok(())
    }

    async fn clear_reactions(&self, message: MessageId) -> Result<()> {
        self.check()?;
        let mut inner = self.lock();
        inner.reactions.remove(&message);
        inner.calls.push(TransportCall::ClearReactions { message });
        Ok(())
    }

    async fn set_presence(&self, activity: &str, status: PresenceStatus) -> Result<()> {
        self.check()?;
        self.lock().calls.push(TransportCall::Presence {
            activity: activity.to_string(),
            status,
        });
        Ok(())
    }
}
