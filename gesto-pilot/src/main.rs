//! GESTO pilot console — entry point.
//!
//! ```text
//! detector | gesto-pilot                 Live landmark frames on stdin
//! gesto-pilot --replay run.jsonl         Play back a recorded feed
//! gesto-pilot --config <path>            Use custom config TOML
//! gesto-pilot --gen-config               Dump default config and exit
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gesto_core::{ControlSession, GestureClassifier, WsChannel};

use gesto_pilot::config::PilotConfig;
use gesto_pilot::feed::{Feed, RecordDetector, ReplayFeed, StdinFeed};

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "gesto-pilot", about = "Drive a robot from hand-gesture landmark feeds")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "gesto-pilot.toml")]
    config: PathBuf,

    /// Robot host (overrides config). Example: 192.168.4.1
    #[arg(short, long)]
    robot: Option<String>,

    /// WebSocket path on the robot (overrides config).
    #[arg(long)]
    path: Option<String>,

    /// Play a recorded JSONL landmark file instead of reading stdin.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Playback rate for --replay, frames per second (overrides config).
    #[arg(long)]
    fps: Option<u32>,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        println!("{}", PilotConfig::default_toml()?);
        return Ok(());
    }

    let mut config = PilotConfig::load(&cli.config);
    if let Some(host) = cli.robot {
        config.robot.host = host;
    }
    if let Some(path) = cli.path {
        config.robot.path = path;
    }
    if let Some(replay) = &cli.replay {
        config.feed.mode = "replay".to_string();
        config.feed.replay_path = replay.display().to_string();
    }
    if let Some(fps) = cli.fps {
        config.feed.fps = fps;
    }

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("gesto-pilot v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Open the landmark feed ───────────────────────────────

    let feed = match config.feed.mode.as_str() {
        "replay" => {
            let path = PathBuf::from(&config.feed.replay_path);
            let feed = ReplayFeed::open(&path, config.feed.fps).await?;
            info!(
                "replaying {} ({} frames at {} fps)",
                path.display(),
                feed.len(),
                config.feed.fps
            );
            Feed::Replay(feed)
        }
        "stdin" => {
            info!("reading landmark frames from stdin");
            Feed::Stdin(StdinFeed::new())
        }
        other => {
            error!("unknown feed mode {other:?} (expected \"stdin\" or \"replay\")");
            std::process::exit(2);
        }
    };
    // Stdin carries the landmark stream, not keystrokes, so the quit
    // key is only wired up when the feed leaves the terminal free.
    let interactive = matches!(feed, Feed::Replay(_));

    // ── 2. Build the session ────────────────────────────────────

    let session = ControlSession::with_config(
        feed,
        RecordDetector,
        GestureClassifier::new(),
        config.session_config(),
    );
    let stop = session.stop_handle();

    // ── 3. Stop triggers ────────────────────────────────────────

    let ctrlc_stop = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            ctrlc_stop.store(true, Ordering::SeqCst);
        }
    });

    if interactive {
        spawn_quit_watcher(Arc::clone(&stop));
    }

    // ── 4. Connect and run ──────────────────────────────────────

    let endpoint = config.robot_endpoint();
    info!("connecting to {}", endpoint.url());

    let result = session.run(WsChannel::open(&endpoint)).await;

    // Unblock the quit watcher and restore the terminal.
    stop.store(true, Ordering::SeqCst);
    if interactive {
        let _ = crossterm::terminal::disable_raw_mode();
    }

    // ── 5. Report ───────────────────────────────────────────────

    match result {
        Ok(report) => {
            info!(
                "session over ({}): {} frames read, {} missed, {} hands, {} commands in {:.1?}",
                report.stop_reason,
                report.frames_read,
                report.frames_missed,
                report.hands_seen,
                report.commands_sent,
                report.ran_for,
            );
            Ok(())
        }
        Err(e) => {
            error!("session aborted: {e}");
            std::process::exit(1);
        }
    }
}

/// Watch for a `q` keypress on a dedicated thread. Crossterm's poll
/// blocks, so the watcher lives off the async runtime; raw mode is
/// required for unbuffered keys and main restores it on exit.
fn spawn_quit_watcher(stop: Arc<AtomicBool>) {
    if let Err(e) = crossterm::terminal::enable_raw_mode() {
        warn!("no raw terminal ({e}); use Ctrl-C to stop");
        return;
    }
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::SeqCst) {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                        // Silent while the terminal is raw; the session's
                        // "operator quit" stop reason reports it.
                        stop.store(true, Ordering::SeqCst);
                    }
                }
            }
        }
    });
}
