//! The control session: connection lifecycle plus the frame loop.
//!
//! One session is one run of the pipeline:
//!
//! 1. A single bounded connection attempt produces the command channel.
//! 2. The loop pulls a frame, runs the detector, classifies each
//!    detected hand, and sends one command message per intent.
//! 3. Teardown releases the video source, then closes the channel, in
//!    that order, on every exit path.
//!
//! Everything runs on one task. Reads and sends complete before the
//! next iteration starts; the stop signal is polled once per iteration
//! and never interrupts an operation in flight. The connect deadline
//! is the only timeout in the session.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::channel::CommandChannel;
use crate::command::CommandMessage;
use crate::error::GestoError;
use crate::finger::FingerState;
use crate::gesture::GestureClassifier;
use crate::session::phase::SessionPhase;
use crate::source::{FrameRead, FrameSource, HandDetector, NullOverlay, Overlay};

// ── SessionConfig ────────────────────────────────────────────────

/// Configuration for [`ControlSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Deadline for the single connection attempt.
    pub connect_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

// ── StopReason ───────────────────────────────────────────────────

/// Why a running session left its frame loop.
#[derive(Debug)]
pub enum StopReason {
    /// The operator requested shutdown.
    OperatorQuit,
    /// The video source reported end-of-stream.
    SourceExhausted,
    /// The video source failed in a way that is not a transient miss.
    SourceFailed(GestoError),
    /// A command send failed; the channel is assumed unrecoverable.
    ChannelFailed(GestoError),
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OperatorQuit => write!(f, "operator quit"),
            Self::SourceExhausted => write!(f, "video source exhausted"),
            Self::SourceFailed(e) => write!(f, "video source failed: {e}"),
            Self::ChannelFailed(e) => write!(f, "channel failed: {e}"),
        }
    }
}

// ── SessionReport ────────────────────────────────────────────────

/// Counters and outcome of one completed session.
#[derive(Debug)]
pub struct SessionReport {
    /// What ended the frame loop.
    pub stop_reason: StopReason,
    /// Frames successfully read from the source.
    pub frames_read: u64,
    /// Transient read misses that were skipped.
    pub frames_missed: u64,
    /// Hands the detector produced across all frames.
    pub hands_seen: u64,
    /// Command messages delivered on the channel.
    pub commands_sent: u64,
    /// Wall-clock time spent in the frame loop.
    pub ran_for: Duration,
}

// ── ControlSession ───────────────────────────────────────────────

/// Owns the video source, detector, classifier, and overlay for one
/// session, and drives them against a command channel.
///
/// # Lifetime
///
/// [`run`](Self::run) consumes the session: connect once, loop until a
/// stop condition, tear down. A stop can be requested at any time via
/// [`stop_handle`](Self::stop_handle); it takes effect at the next
/// iteration boundary.
pub struct ControlSession<S, D>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
{
    source: S,
    detector: D,
    classifier: GestureClassifier,
    overlay: Box<dyn Overlay<S::Frame>>,
    stop: Arc<AtomicBool>,
    phase: SessionPhase,
    config: SessionConfig,
}

impl<S, D> ControlSession<S, D>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
{
    /// Create a session with the default configuration and no overlay.
    pub fn new(source: S, detector: D, classifier: GestureClassifier) -> Self {
        Self::with_config(source, detector, classifier, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(
        source: S,
        detector: D,
        classifier: GestureClassifier,
        config: SessionConfig,
    ) -> Self {
        Self {
            source,
            detector,
            classifier,
            overlay: Box::new(NullOverlay),
            stop: Arc::new(AtomicBool::new(false)),
            phase: SessionPhase::default(),
            config,
        }
    }

    /// Attach a visualization overlay. Replaces the default no-op one.
    pub fn with_overlay(mut self, overlay: impl Overlay<S::Frame> + 'static) -> Self {
        self.overlay = Box::new(overlay);
        self
    }

    /// A cloneable handle that requests shutdown from another task.
    /// Store `true` to stop; the loop polls it once per iteration.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Request shutdown at the next iteration boundary.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Run the session to completion.
    ///
    /// `connect` produces the command channel; the session wraps it in
    /// the configured deadline, so the attempt itself needs no timeout
    /// of its own. Returns `Err` only when the connection attempt
    /// times out or fails — once the loop has started, the outcome is
    /// an `Ok` report whose [`StopReason`] says how it ended.
    pub async fn run<C, Fut>(mut self, connect: Fut) -> Result<SessionReport, GestoError>
    where
        C: CommandChannel,
        Fut: Future<Output = Result<C, GestoError>>,
    {
        self.phase.begin_connect()?;
        debug!(
            "connecting (deadline {:?})",
            self.config.connect_timeout
        );

        let mut channel = match tokio::time::timeout(self.config.connect_timeout, connect).await {
            Ok(Ok(channel)) => channel,
            Ok(Err(e)) => return self.abort(e).await,
            Err(_elapsed) => {
                let deadline = self.config.connect_timeout;
                return self.abort(GestoError::ConnectTimeout(deadline)).await;
            }
        };

        self.phase.begin_running()?;
        info!("channel open; control loop started");

        let started = Instant::now();
        let mut frames_read: u64 = 0;
        let mut frames_missed: u64 = 0;
        let mut hands_seen: u64 = 0;
        let mut commands_sent: u64 = 0;

        let stop_reason = 'control: loop {
            // 1. Operator stop, polled once per iteration.
            if self.stop.load(Ordering::SeqCst) {
                break 'control StopReason::OperatorQuit;
            }

            // 2. Source still open?
            if !self.source.is_open() {
                break 'control StopReason::SourceExhausted;
            }

            // 3. Read one frame. A miss skips the iteration.
            let frame = match self.source.read_frame().await {
                Ok(FrameRead::Frame(frame)) => frame,
                Ok(FrameRead::Missed) => {
                    frames_missed += 1;
                    debug!("empty frame skipped");
                    tokio::task::yield_now().await;
                    continue;
                }
                Ok(FrameRead::Exhausted) => break 'control StopReason::SourceExhausted,
                Err(e) => {
                    error!("frame source failed: {e}");
                    break 'control StopReason::SourceFailed(e);
                }
            };
            frames_read += 1;

            // 4. Detect and classify each hand; one message per intent.
            let hands = self.detector.detect(&frame);
            hands_seen += hands.len() as u64;

            let mut last_intent = None;
            for hand in &hands {
                let state = FingerState::read(hand);
                let Some(rule) = self.classifier.classify_state(state) else {
                    debug!("no rule for finger vector {state}");
                    continue;
                };

                let message = CommandMessage::from(rule.intent);
                if let Err(e) = channel.send(&message).await {
                    error!("send failed: {e}");
                    break 'control StopReason::ChannelFailed(e);
                }
                commands_sent += 1;
                info!(
                    "sent angle={} speed={} ({}, fingers {})",
                    message.angulo, message.velocidade, rule.name, state
                );
                last_intent = Some(rule.intent);
            }

            // 5. Diagnostics only; cannot affect the loop.
            self.overlay.render(&frame, &hands, last_intent);
        };

        // Teardown order is part of the contract: source, then channel.
        self.phase.begin_shutdown()?;
        info!("control loop stopped: {stop_reason}");

        self.source.release().await;
        if let Err(e) = channel.close().await {
            warn!("channel close: {e}");
        }
        self.phase.terminate()?;

        Ok(SessionReport {
            stop_reason,
            frames_read,
            frames_missed,
            hands_seen,
            commands_sent,
            ran_for: started.elapsed(),
        })
    }

    /// Aborted path: no frame was ever read and no command sent. The
    /// source may have been acquired, so release it before reporting.
    async fn abort(mut self, err: GestoError) -> Result<SessionReport, GestoError> {
        self.phase.abort()?;
        error!("connection attempt failed: {err}");
        self.source.release().await;
        self.phase.terminate()?;
        Err(err)
    }
}

// ── Tests ────────────────────────────────────────────────────────
