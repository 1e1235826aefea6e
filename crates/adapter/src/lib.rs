//! Adapter module - running games through a chat platform
//!
//! This crate turns a [`Game`](crate::core::Game) into a chat bot. The bot
//! posts the rendered screen as a message, attaches the game's controls as
//! reactions and treats reactions from the player as input.
//!
//! # Session Overview
//!
//! 1. **Trigger**: a message `"{prefix}{name}"` (or an alias) reserves the single session slot
//! 2. **Post**: the blank screen is posted and the controls are attached
//! 3. **Play**: the loop updates and re-renders every tick (real-time) or after input (turn-based)
//! 4. **Input**: only the triggering user's reactions on the game message count
//! 5. **Teardown**: when the game ends or input stops for `timeout`, reactions are cleared
//!
//! # Gateway Protocol
//!
//! The bundled transport is a **line-delimited JSON protocol** over TCP in
//! which clients stand in for the chat platform:
//!
//! ```text
//! Bot    -> Client: {"type":"welcome","version":"1.0.0"}
//! Bot    -> Client: {"type":"presence","activity":"!wander","status":"online"}
//! Client -> Bot:    {"type":"messageCreate","channel":1,"author":7,"content":"!wander"}
//! Bot    -> Client: {"type":"messageCreate","id":1,"channel":1,"content":"**Wander**\n..."}
//! Bot    -> Client: {"type":"reactionAdd","message":1,"emoji":"⬅️"}
//! Client -> Bot:    {"type":"reactionAdd","message":1,"user":7,"emoji":"⬅️"}
//! Bot    -> Client: {"type":"reactionRemove","message":1,"emoji":"⬅️","user":7}
//! Bot    -> Client: {"type":"messageUpdate","id":1,"content":"**Wander**\n..."}
//! ```
//!
//! # Environment Variables
//!
//! - `GAMECORD_PREFIX`: command prefix (default: "!")
//! - `GAMECORD_NAME`: command and display name (default: the game's name)
//! - `GAMECORD_HOST` / `GAMECORD_PORT`: gateway bind address (default: 127.0.0.1:7878)
//! - `GAMECORD_PACING_MS`: courtesy delay around posts and reactions (default: 250, 0 disables)
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"messageCreate","channel":1,"author":7,"content":"!wander"}
//! ```

pub mod attach;
pub mod bot;
pub mod config;
pub mod extensions;
pub mod filter;
pub mod pacing;
pub mod protocol;
pub mod runner;
pub mod runtime;
pub mod server;
pub mod session;
pub mod transport;

pub use gamecord_core as core;
pub use gamecord_types as types;

pub use attach::attach_controls;
pub use bot::{Bot, BotEvent, DispatchError, IncomingMessage, ReactionAdd, SessionTask};
pub use config::{BotConfig, GatewayConfig};
pub use extensions::{ExtensionError, ExtensionRegistry};
pub use filter::{Admission, ReactionFilter, Rejection};
pub use pacing::PacingPolicy;
pub use protocol::{InboundFrame, OutboundFrame};
pub use runner::{run_session, EndReason, SessionContext, SessionEnd, Trigger};
pub use runtime::{Gateway, GatewayTransport};
pub use server::run_gateway;
pub use session::{ActiveSession, InactivityTimer, SessionHandles, SessionInfo, SessionSlot};
pub use transport::{ChatTransport, PresenceStatus, RecordingTransport, TransportCall};
