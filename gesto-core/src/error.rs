//! Domain-specific error types for the GESTO control pipeline.
//!
//! All fallible operations return `Result<T, GestoError>`.
//! No panics on invalid input — every error is typed and recoverable.

use std::time::Duration;
use thiserror::Error;

/// The canonical error type for the GESTO pipeline.
#[derive(Debug, Error)]
pub enum GestoError {
    // ── Connection Errors ────────────────────────────────────────
    /// The single connection attempt exceeded its deadline.
    ///
    /// Terminal: the session never enters the running loop and no
    /// retry is attempted.
    #[error("connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// The channel endpoint refused or dropped the connection attempt.
    #[error("connection failed: {0}")]
    Connect(String),

    /// A command message could not be delivered on the open channel.
    #[error("send failed: {0}")]
    SendFailure(String),

    /// The peer closed the channel mid-session.
    #[error("channel closed by peer")]
    ChannelClosed,

    // ── Session Errors ───────────────────────────────────────────
    /// A session phase transition was requested from the wrong phase.
    #[error("invalid session transition: {0}")]
    InvalidTransition(&'static str),

    /// The video source reported a fault that is not a transient miss.
    #[error("frame source error: {0}")]
    Source(String),

    // ── Serialization Errors ─────────────────────────────────────
    /// Encoding of a command message failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    // ── I/O ──────────────────────────────────────────────────────
    /// The underlying transport reported an I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Convenient From implementations ──────────────────────────────

impl From<serde_json::Error> for GestoError {
    fn from(e: serde_json::Error) -> Self {
        GestoError::Encoding(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for GestoError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match e {
            WsError::ConnectionClosed | WsError::AlreadyClosed => GestoError::ChannelClosed,
            WsError::Io(io) => GestoError::Io(io),
            other => GestoError::SendFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = GestoError::ConnectTimeout(Duration::from_secs(10));
        assert!(e.to_string().contains("10s"));

        let e = GestoError::SendFailure("socket gone".into());
        assert!(e.to_string().contains("socket gone"));
    }

    #[test]
    fn from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broke");
        let e: GestoError = io_err.into();
        assert!(matches!(e, GestoError::Io(_)));
    }

    #[test]
    fn from_serde_json() {
        let bad = serde_json::from_str::<serde_json::Value>("{nope");
        let e: GestoError = bad.unwrap_err().into();
        assert!(matches!(e, GestoError::Encoding(_)));
    }

    #[test]
    fn closed_ws_maps_to_channel_closed() {
        use tokio_tungstenite::tungstenite::Error as WsError;
        let e: GestoError = WsError::ConnectionClosed.into();
        assert!(matches!(e, GestoError::ChannelClosed));
    }
}
