//! A [`ChatTransport`] backed by the local terminal.
//!
//! There is one channel and one visible message: posting replaces the view,
//! edits and reactions apply only to the current message.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use tokio::sync::watch;

use crate::adapter::{ChatTransport, PresenceStatus};
use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// What the terminal shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub message: Option<MessageId>,
    pub content: String,
    pub reactions: Vec<Symbol>,
    pub activity: String,
    pub status: Option<PresenceStatus>,
}

pub struct TerminalTransport {
    view: watch::Sender<View>,
    next_id: AtomicU64,
}

impl Default for TerminalTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalTransport {
    pub fn new() -> Self {
        let (view, _) = watch::channel(View::default());
        Self {
            view,
            next_id: AtomicU64::new(0),
        }
    }

    /// Receiver notified on every change to the view.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view.subscribe()
    }

    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }

    pub fn current_message(&self) -> Option<MessageId> {
        self.view.borrow().message
    }

    fn modify_current(&self, message: MessageId, f: impl FnOnce(&mut View)) {
        self.view.send_if_modified(|v| {
            if v.message != Some(message) {
                return false;
            }
            f(v);
            true
        });
    }
}

impl ChatTransport for TerminalTransport {
    async fn send_message(&self, _channel: ChannelId, content: &str) -> Result<MessageId> {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.view.send_modify(|v| {
            v.message = Some(id);
            v.content = content.to_string();
            v.reactions.clear();
        });
        Ok(id)
    }

    async fn edit_message(&self, message: MessageId, content: &str) -> Result<()> {
        self.modify_current(message, |v| v.content = content.to_string());
        Ok(())
    }

    async fn add_reaction(&self, message: MessageId, emoji: &Symbol) -> Result<()> {
        self.modify_current(message, |v| {
            if !v.reactions.contains(emoji) {
                v.reactions.push(emoji.clone());
            }
        });
        Ok(())
    }

    // The bot's own reaction stays, only the player's is taken back.
    async fn remove_reaction(&self, _message: MessageId, _emoji: &Symbol, _user: UserId) -> Result<()> {
        Ok(())
    }

    async fn clear_reactions(&self, message: MessageId) -> Result<()> {
        self.modify_current(message, |v| v.reactions.clear());
        Ok(())
    }

    async fn set_presence(&self, activity: &str, status: PresenceStatus) -> Result<()> {
        self.view.send_modify(|v| {
            v.activity = activity.to_string();
            v.status = Some(status);
        });
        Ok(())
    }
}

/// Lay out `view` as terminal lines.
pub fn compose(view: &View) -> Vec<String> {
    let mut lines = Vec::new();

    let status = match view.status {
        Some(PresenceStatus::Online) => "online",
        Some(PresenceStatus::Idle) => "idle",
        None => "connecting",
    };
    lines.push(format!("{} [{}]", view.activity, status));
    lines.push(String::new());

    if view.message.is_some() {
        lines.extend(view.content.lines().map(str::to_string));
        lines.push(String::new());
        let reactions: Vec<&str> = view.reactions.iter().map(Symbol::as_str).collect();
        lines.push(reactions.join(" "));
    } else {
        lines.push("press r to start".to_string());
    }

    lines.push(String::new());
    lines.push("arrows/1-9 react  enter record  esc stop  r restart  q quit".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn posting_replaces_the_current_message() {
        let t = TerminalTransport::new();
        let first = t.send_message(ChannelId(1), "one").await.unwrap();
        t.add_reaction(first, &Symbol::from("⬆️")).await.unwrap();

        let second = t.send_message(ChannelId(1), "two").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(t.current_message(), Some(second));
        assert!(t.view().reactions.is_empty());

        // Stale edits are ignored.
        t.edit_message(first, "stale").await.unwrap();
        assert_eq!(t.view().content, "two");
    }

    #[tokio::test]
    async fn reactions_are_deduplicated_and_cleared() {
        let t = TerminalTransport::new();
        let id = t.send_message(ChannelId(1), "screen").await.unwrap();
        let up = Symbol::from("⬆️");
        t.add_reaction(id, &up).await.unwrap();
        t.add_reaction(id, &up).await.unwrap();
        assert_eq!(t.view().reactions, vec![up.clone()]);

        t.remove_reaction(id, &up, UserId(7)).await.unwrap();
        assert_eq!(t.view().reactions.len(), 1);

        t.clear_reactions(id).await.unwrap();
        assert!(t.view().reactions.is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let t = TerminalTransport::new();
        let mut rx = t.subscribe();
        t.set_presence("!wander", PresenceStatus::Online).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().activity, "!wander");
    }

    #[test]
    fn compose_lays_out_message_and_reactions() {
        let view = View {
            message: Some(MessageId(1)),
            content: "T\nac\nbd\n\nF".to_string(),
            reactions: vec![Symbol::from("⬅️"), Symbol::from("➡️")],
            activity: "!wander".to_string(),
            status: Some(PresenceStatus::Online),
        };
        let lines = compose(&view);
        assert_eq!(lines[0], "!wander [online]");
        assert_eq!(&lines[2..7], ["T", "ac", "bd", "", "F"]);
        assert_eq!(lines[8], "⬅️ ➡️");
    }

    #[test]
    fn compose_without_message_shows_hint() {
        let lines = compose(&View::default());
        assert_eq!(lines[0], " [connecting]");
        assert_eq!(lines[2], "press r to start");
    }
}
