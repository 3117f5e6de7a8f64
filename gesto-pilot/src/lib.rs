//! # gesto-pilot — Gesture Pilot Console
//!
//! Runs on the operator machine. Reads hand-landmark frames from an
//! external detector process (JSON Lines on stdin) or from a recorded
//! file, runs them through `gesto-core`'s classifier and control
//! session, and streams motion commands to the robot's WebSocket
//! endpoint.

pub mod config;
pub mod feed;
