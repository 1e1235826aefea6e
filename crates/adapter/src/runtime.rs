//! Gateway runtime integration.
//!
//! Bridges the bot's [`ChatTransport`] calls to the TCP gateway and the
//! gateway's inbound frames to the bot's event channel.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::bot::BotEvent;
use crate::config::GatewayConfig;
use crate::protocol::OutboundFrame;
use crate::server::run_gateway;
use crate::transport::{ChatTransport, PresenceStatus};
use crate::types::{ChannelId, MessageId, Symbol, UserId};

/// [`ChatTransport`] that publishes every call as an [`OutboundFrame`].
#[derive(Debug)]
pub struct GatewayTransport {
    out_tx: mpsc::UnboundedSender<OutboundFrame>,
    next_id: AtomicU64,
}

impl GatewayTransport {
    pub fn new(out_tx: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        Self {
            out_tx,
            next_id: AtomicU64::new(0),
        }
    }

    fn publish(&self, frame: OutboundFrame) -> Result<()> {
        self.out_tx
            .send(frame)
            .map_err(|_| anyhow!("gateway is closed"))
    }
}

impl ChatTransport for GatewayTransport {
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<MessageId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.publish(OutboundFrame::MessageCreate {
            id,
            channel: channel.0,
            content: content.to_string(),
        })?;
        Ok(MessageId(id))
    }

    async fn edit_message(&self, message: MessageId, content: &str) -> Result<()> {
        self.publish(OutboundFrame::MessageUpdate {
            id: message.0,
            content: content.to_string(),
        })
    }

    async fn add_reaction(&self, message: MessageId, emoji: &Symbol) -> Result<()> {
        self.publish(OutboundFrame::ReactionAdd {
            message: message.0,
            emoji: emoji.to_string(),
        })
    }

    async fn remove_reaction(&self, message: MessageId, emoji: &Symbol, user: UserId) -> Result<()> {
        self.publish(OutboundFrame::ReactionRemove {
            message: message.0,
            emoji: emoji.to_string(),
            user: user.0,
        })
    }

    async fn clear_reactions(&self, message: MessageId) -> Result<()> {
        self.publish(OutboundFrame::ReactionsClear { message: message.0 })
    }

    async fn set_presence(&self, activity: &str, status: PresenceStatus) -> Result<()> {
        self.publish(OutboundFrame::Presence {
            activity: activity.to_string(),
            status,
        })
    }
}

/// A running gateway.
pub struct Gateway {
    pub transport: GatewayTransport,
    pub events: mpsc::Receiver<BotEvent>,
    pub addr: SocketAddr,
    pub task: JoinHandle<Result<()>>,
}

impl Gateway {
    /// Bind and start serving; resolves once the listener is up.
    pub async fn start(config: GatewayConfig) -> Result<Self> {
        let (event_tx, events) = mpsc::channel(config.max_pending_events.max(1));
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        let task = tokio::spawn(run_gateway(config, event_tx, out_rx, Some(ready_tx)));

        let addr = match ready_rx.await {
            Ok(addr) => addr,
            Err(_) => {
                // The server exited before binding; surface its error.
                return Err(match task.await {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => anyhow!("gateway stopped before binding"),
                    Err(e) => anyhow!(e),
                });
            }
        };

        Ok(Self {
            transport: GatewayTransport::new(out_tx),
            events,
            addr,
            task,
        })
    }
}
