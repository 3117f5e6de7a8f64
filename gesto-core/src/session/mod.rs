pub mod control;
pub mod phase;

pub use control::{ControlSession, SessionConfig, SessionReport, StopReason};
pub use phase::SessionPhase;
