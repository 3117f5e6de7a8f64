//! Control session lifecycle state machine.
//!
//! Models one run of the gesture pipeline, with validated transitions
//! that return `Result` instead of panicking.
//!
//! ```text
//!  Idle ──► Connecting ──► Running ──► ShuttingDown ──► Terminated
//!               │                                            ▲
//!               ▼                                            │
//!            Aborted ────────────────────────────────────────┘
//! ```
//!
//! `Aborted` is reachable only from `Connecting`: once the session is
//! running, every exit (operator stop, source exhaustion, channel
//! failure) goes through the ordered `ShuttingDown` teardown.

use std::time::Instant;

use crate::error::GestoError;

// ── SessionPhase ─────────────────────────────────────────────────

/// The current phase of a control session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Not started. Initial state.
    #[default]
    Idle,

    /// Single bounded connection attempt in flight.
    Connecting,

    /// Channel open; the frame loop is live.
    Running {
        /// When the session entered the `Running` state.
        since: Instant,
    },

    /// Ordered teardown: release the source, then close the channel.
    ShuttingDown,

    /// The connection attempt timed out or failed. Terminal path that
    /// never saw a frame.
    Aborted,

    /// Fully torn down. Terminal state.
    Terminated,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Running { .. } => write!(f, "Running"),
            Self::ShuttingDown => write!(f, "ShuttingDown"),
            Self::Aborted => write!(f, "Aborted"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}

impl SessionPhase {
    /// Returns `true` while the frame loop is live.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Returns `true` once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// How long the session has been in the `Running` state.
    ///
    /// Returns `None` for any other phase.
    pub fn running_duration(&self) -> Option<std::time::Duration> {
        match self {
            Self::Running { since } => Some(since.elapsed()),
            _ => None,
        }
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Transition to `Connecting`.
    ///
    /// Valid from: `Idle`.
    pub fn begin_connect(&mut self) -> Result<(), GestoError> {
        match self {
            Self::Idle => {
                *self = Self::Connecting;
                Ok(())
            }
            _ => Err(GestoError::InvalidTransition(
                "cannot connect: not in Idle state",
            )),
        }
    }

    /// Transition to `Running`.
    ///
    /// Valid from: `Connecting`.
    pub fn begin_running(&mut self) -> Result<(), GestoError> {
        match self {
            Self::Connecting => {
                *self = Self::Running {
                    since: Instant::now(),
                };
                Ok(())
            }
            _ => Err(GestoError::InvalidTransition(
                "cannot run: not in Connecting state",
            )),
        }
    }

    /// Transition to `ShuttingDown`.
    ///
    /// Valid from: `Running`.
    pub fn begin_shutdown(&mut self) -> Result<(), GestoError> {
        match self {
            Self::Running { .. } => {
                *self = Self::ShuttingDown;
                Ok(())
            }
            _ => Err(GestoError::InvalidTransition(
                "cannot shut down: not in Running state",
            )),
        }
    }

    /// Transition to `Aborted`.
    ///
    /// Valid from: `Connecting` (timeout or connect failure).
    pub fn abort(&mut self) -> Result<(), GestoError> {
        match self {
            Self::Connecting => {
                *self = Self::Aborted;
                Ok(())
            }
            _ => Err(GestoError::InvalidTransition(
                "cannot abort: not in Connecting state",
            )),
        }
    }

    /// Transition to `Terminated`.
    ///
    /// Valid from: `ShuttingDown`, `Aborted`.
    pub fn terminate(&mut self) -> Result<(), GestoError> {
        match self {
            Self::ShuttingDown | Self::Aborted => {
                *self = Self::Terminated;
                Ok(())
            }
            _ => Err(GestoError::InvalidTransition(
                "cannot terminate: not in ShuttingDown or Aborted state",
            )),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
