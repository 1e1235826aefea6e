//! TCP gateway server
//!
//! Accepts gateway clients, forwards their frames to the bot as
//! [`BotEvent`]s and broadcasts every outbound frame to all of them.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::bot::BotEvent;
use crate::config::GatewayConfig;
use crate::protocol::{create_error, parse_inbound, ErrorCode, OutboundFrame};

/// Handle to a connected client.
struct ClientHandle {
    id: usize,
    tx: mpsc::UnboundedSender<String>,
}

struct GatewayState {
    config: GatewayConfig,
    clients: RwLock<Vec<ClientHandle>>,
}

fn encode(frame: &OutboundFrame) -> Option<String> {
    match serde_json::to_string(frame) {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(error = %e, "failed to encode frame");
            None
        }
    }
}

/// Run the gateway until the listener fails.
///
/// `ready_tx` receives the bound address, which matters when `port` is 0.
/// A [`BotEvent::Ready`] is queued once the listener is bound.
pub async fn run_gateway(
    config: GatewayConfig,
    event_tx: mpsc::Sender<BotEvent>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundFrame>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "gateway listening");

    event_tx.send(BotEvent::Ready).await?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(GatewayState {
        config,
        clients: RwLock::new(Vec::new()),
    });

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                let Some(line) = encode(&frame) else {
                    continue;
                };
                let clients = state.clients.read().await;
                for c in clients.iter() {
                    let _ = c.tx.send(line.clone());
                }
            }
        });
    }

    let mut next_client_id = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        next_client_id += 1;
        let client_id = next_client_id;
        info!(client = client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, Arc::clone(&state), event_tx).await {
                warn!(client = client_id, error = %e, "client error");
            }
            state.clients.write().await.retain(|c| c.id != client_id);
            info!(client = client_id, "client disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<GatewayState>,
    event_tx: mpsc::Sender<BotEvent>,
) -> Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let welcome = OutboundFrame::Welcome {
        version: state.config.protocol_version.clone(),
    };
    if let Some(line) = encode(&welcome) {
        let _ = tx.send(line);
    }
    state.clients.write().await.push(ClientHandle {
        id: client_id,
        tx: tx.clone(),
    });

    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.write_all(b"\n").await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let mut line = String::new();
    let result = loop {
        line.clear();
        let bytes_read = match reader.read_line(&mut line).await {
            Ok(n) => n,
            Err(e) => break Err(e.into()),
        };
        if bytes_read == 0 {
            break Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let frame = match parse_inbound(trimmed) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(client = client_id, error = %e, "invalid frame");
                if let Some(out) = encode(&create_error(ErrorCode::InvalidFrame, e.to_string())) {
                    let _ = tx.send(out);
                }
                continue;
            }
        };

        match event_tx.try_send(frame.into_event()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                if let Some(out) = encode(&create_error(ErrorCode::Backpressure, "bot is busy")) {
                    let _ = tx.send(out);
                }
            }
            Err(mpsc::error::TrySendError::Closed(_)) => break Ok(()),
        }
    };

    // The client entry holds a sender too; drop ours and stop writing.
    drop(tx);
    write_task.abort();
    result
}
