//! Command channel to the robot.
//!
//! The robot exposes a WebSocket endpoint (stock firmware serves it on
//! its own access point at `192.168.4.1/ws`). Each motion command is
//! one text message on that channel; nothing is ever read back.
//!
//! [`CommandChannel`] is the seam the control session drives, so tests
//! can substitute a recording channel for the real socket.

use async_trait::async_trait;
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::command::CommandMessage;
use crate::error::GestoError;

// ── RobotEndpoint ────────────────────────────────────────────────

/// Where the robot listens: host (optionally `host:port`) plus the
/// WebSocket path on that host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotEndpoint {
    host: String,
    path: String,
}

impl RobotEndpoint {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            host: host.into(),
            path,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full `ws://` URL for the connection attempt.
    pub fn url(&self) -> String {
        format!("ws://{}{}", self.host, self.path)
    }
}

// ── CommandChannel ───────────────────────────────────────────────

/// Outbound command transport.
///
/// `send` delivers one serialized command message; `close` performs
/// the channel's half of a graceful shutdown. Both consume the error
/// as fatal — the session never retries a failed channel.
#[async_trait]
pub trait CommandChannel: Send {
    async fn send(&mut self, message: &CommandMessage) -> Result<(), GestoError>;

    async fn close(&mut self) -> Result<(), GestoError>;
}

// ── WsChannel ────────────────────────────────────────────────────

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Production channel over a WebSocket connection.
pub struct WsChannel {
    stream: WsStream,
}

impl WsChannel {
    /// Attempt the connection. This does not bound its own time — the
    /// session wraps the attempt in its connect deadline.
    pub async fn open(endpoint: &RobotEndpoint) -> Result<Self, GestoError> {
        let url = endpoint.url();
        let (stream, _response) = connect_async(&url)
            .await
            .map_err(|e| GestoError::Connect(format!("{url}: {e}")))?;
        Ok(Self { stream })
    }
}

#[async_trait]
impl CommandChannel for WsChannel {
    async fn send(&mut self, message: &CommandMessage) -> Result<(), GestoError> {
        let body = message.to_json()?;
        self.stream.send(Message::text(body)).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), GestoError> {
        self.stream.close(None).await.map_err(GestoError::from)
    }
}

// ── Tests ────────────────────────────────────────────────────────
