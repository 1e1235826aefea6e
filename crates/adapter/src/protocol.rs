//! Protocol module - JSON frames exchanged with gateway clients
//!
//! Every frame is one JSON object per line with a camelCase `type` tag.
//! Clients play the part of the chat platform: they report messages and
//! reactions, and receive everything the bot posts, edits or reacts with.

use serde::{Deserialize, Serialize};

use crate::bot::{BotEvent, IncomingMessage, ReactionAdd};
use crate::transport::PresenceStatus;
use crate::types::{ChannelId, MessageId, Symbol, UserId};

// ============== Client -> Bot ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundFrame {
    MessageCreate {
        channel: u64,
        author: u64,
        content: String,
    },
    ReactionAdd {
        message: u64,
        user: u64,
        emoji: String,
    },
}

impl InboundFrame {
    pub fn into_event(self) -> BotEvent {
        match self {
            Self::MessageCreate {
                channel,
                author,
                content,
            } => BotEvent::Message(IncomingMessage {
                channel: ChannelId(channel),
                author: UserId(author),
                content,
            }),
            Self::ReactionAdd {
                message,
                user,
                emoji,
            } => BotEvent::Reaction(ReactionAdd {
                message: MessageId(message),
                user: UserId(user),
                emoji: Symbol::from(emoji),
            }),
        }
    }
}

// ============== Bot -> Client ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundFrame {
    Welcome {
        version: String,
    },
    MessageCreate {
        id: u64,
        channel: u64,
        content: String,
    },
    MessageUpdate {
        id: u64,
        content: String,
    },
    ReactionAdd {
        message: u64,
        emoji: String,
    },
    ReactionRemove {
        message: u64,
        emoji: String,
        user: u64,
    },
    ReactionsClear {
        message: u64,
    },
    Presence {
        activity: String,
        status: PresenceStatus,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidFrame,
    Backpressure,
}

pub fn parse_inbound(line: &str) -> Result<InboundFrame, serde_json::Error> {
    serde_json::from_str(line)
}

pub fn create_error(code: ErrorCode, message: impl Into<String>) -> OutboundFrame {
    OutboundFrame::Error {
        code,
        message: message.into(),
    }
}
