//! Pilot configuration.
//!
//! Loaded from a TOML file at startup. Every field has a default so a
//! missing or partial file still yields a usable config; command-line
//! flags override individual fields on top of that.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gesto_core::{RobotEndpoint, SessionConfig};

// ── Top-level config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    pub robot: RobotConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

// ── Sections ─────────────────────────────────────────────────────────────────

/// Where the robot listens and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Host (and optional port) of the robot's WebSocket server. The
    /// stock firmware brings up its own access point on this address.
    pub host: String,
    /// Path of the command endpoint on that server.
    pub path: String,
    /// Upper bound on the single connection attempt, in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            host: "192.168.4.1".to_string(),
            path: "/ws".to_string(),
            connect_timeout_ms: 10_000,
        }
    }
}

/// Which landmark feed to run the session over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// `"stdin"` (live detector process piped in) or `"replay"`.
    pub mode: String,
    /// Recorded JSONL file for replay mode.
    pub replay_path: String,
    /// Playback rate for replay mode, frames per second.
    pub fps: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: "stdin".to_string(),
            replay_path: String::new(),
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ── Loading and conversions ──────────────────────────────────────────────────

impl PilotConfig {
    /// Load from a TOML file, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => {
                    info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("config at {} is invalid ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Render the default config as TOML, for `--gen-config`.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Self::default())
    }

    pub fn robot_endpoint(&self) -> RobotEndpoint {
        RobotEndpoint::new(&self.robot.host, &self.robot.path)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            connect_timeout: Duration::from_millis(self.robot.connect_timeout_ms),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let text = PilotConfig::default_toml().unwrap();
        assert!(text.contains("[robot]"));
        assert!(text.contains("host"));
        assert!(text.contains("connect_timeout_ms"));
        assert!(text.contains("[feed]"));
        assert!(text.contains("replay_path"));
    }

    #[test]
    fn default_config_roundtrips() {
        let text = PilotConfig::default_toml().unwrap();
        let parsed: PilotConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.robot.host, "192.168.4.1");
        assert_eq!(parsed.robot.path, "/ws");
        assert_eq!(parsed.robot.connect_timeout_ms, 10_000);
        assert_eq!(parsed.feed.mode, "stdin");
        assert_eq!(parsed.feed.fps, 30);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let parsed: PilotConfig = toml::from_str("[robot]\nhost = \"10.0.0.7:81\"\n").unwrap();
        assert_eq!(parsed.robot.host, "10.0.0.7:81");
        assert_eq!(parsed.robot.path, "/ws");
        assert_eq!(parsed.feed.mode, "stdin");
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn endpoint_reflects_robot_section() {
        let config = PilotConfig::default();
        assert_eq!(config.robot_endpoint().url(), "ws://192.168.4.1/ws");
        assert_eq!(config.session_config().connect_timeout, Duration::from_secs(10));
    }
}
