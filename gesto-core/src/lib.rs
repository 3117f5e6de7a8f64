//! # gesto-core
//!
//! Core library for GESTO — hand-gesture control of a small wheeled
//! robot over a WebSocket command channel.
//!
//! This crate contains:
//! - **Landmark model**: `HandLandmark`, `Point`, `HandSnapshot` — the 21-point hand observation
//! - **Finger state**: `Finger`, `FingerState` — per-finger open/closed derivation
//! - **Classification**: `GestureClassifier` and the ordered `RULES` table mapping finger vectors to `MotionIntent`
//! - **Wire format**: `CommandMessage` — the JSON command body the robot firmware consumes
//! - **Channel**: `CommandChannel` seam with the production `WsChannel` over `tokio_tungstenite`
//! - **Seams**: `FrameSource`, `HandDetector`, `Overlay` for the external capture/detection engines
//! - **Session**: `ControlSession` lifecycle driver with a validated `SessionPhase` machine
//! - **Error**: `GestoError` — typed, `thiserror`-based error hierarchy

pub mod channel;
pub mod command;
pub mod error;
pub mod finger;
pub mod gesture;
pub mod landmark;
pub mod session;
pub mod source;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use channel::{CommandChannel, RobotEndpoint, WsChannel};
pub use command::CommandMessage;
pub use error::GestoError;
pub use finger::{Finger, FingerState};
pub use gesture::{GestureClassifier, GestureRule, MotionIntent, RULES};
pub use landmark::{HandLandmark, HandSnapshot, LANDMARK_COUNT, Point};
pub use session::{ControlSession, SessionConfig, SessionPhase, SessionReport, StopReason};
pub use source::{FrameRead, FrameSource, HandDetector, NullOverlay, Overlay};
