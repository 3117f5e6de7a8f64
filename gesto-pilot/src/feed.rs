//! Landmark feeds.
//!
//! The camera and the landmark detector run outside this process; any
//! engine that can print landmarks will do. The pilot consumes their
//! output as JSON Lines, one record per frame, 21 `[x, y, z]` triples
//! per detected hand:
//!
//! ```text
//! {"hands":[[[0.61,0.72,0.0],[0.58,0.69,-0.02], ... 21 triples ...]]}
//! ```
//!
//! Two sources are provided:
//! - [`StdinFeed`] reads records as a live detector process emits them
//! - [`ReplayFeed`] plays a recorded file back at a fixed rate
//!
//! Blank lines are dropped frames. Malformed lines are reported and
//! treated the same way, so one bad record never ends a session.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::Instant;
use tracing::warn;

use gesto_core::{
    FrameRead, FrameSource, GestoError, HandDetector, HandSnapshot, LANDMARK_COUNT, Point,
};

// ── Frame records ────────────────────────────────────────────────────────────

/// One frame of detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Zero or more hands, each a full set of 21 landmark triples in
    /// canonical hand-topology order.
    #[serde(default)]
    pub hands: Vec<[[f32; 3]; LANDMARK_COUNT]>,
}

impl FrameRecord {
    /// Parse one feed line. Blank and malformed lines both come back as
    /// `None`, which the feeds surface as a dropped frame.
    fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("bad frame record skipped: {e}");
                None
            }
        }
    }

    /// Unpack the raw triples into landmark snapshots.
    pub fn snapshots(&self) -> Vec<HandSnapshot> {
        self.hands
            .iter()
            .map(|hand| {
                let mut points = [Point::default(); LANDMARK_COUNT];
                for (point, [x, y, z]) in points.iter_mut().zip(hand) {
                    *point = Point::new(*x, *y, *z);
                }
                HandSnapshot::new(points)
            })
            .collect()
    }
}

/// Detection already happened upstream, so "detecting" a record is a
/// straight unpack of its triples.
pub struct RecordDetector;

impl HandDetector<FrameRecord> for RecordDetector {
    fn detect(&mut self, frame: &FrameRecord) -> Vec<HandSnapshot> {
        frame.snapshots()
    }
}

// ── Stdin feed ───────────────────────────────────────────────────────────────

/// Live feed from a detector process piped into us.
pub struct StdinFeed {
    lines: Lines<BufReader<Stdin>>,
    open: bool,
}

impl StdinFeed {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            open: true,
        }
    }
}

impl Default for StdinFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for StdinFeed {
    type Frame = FrameRecord;

    fn is_open(&self) -> bool {
        self.open
    }

    async fn read_frame(&mut self) -> Result<FrameRead<FrameRecord>, GestoError> {
        if !self.open {
            return Ok(FrameRead::Exhausted);
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => match FrameRecord::from_line(&line) {
                Some(record) => Ok(FrameRead::Frame(record)),
                None => Ok(FrameRead::Missed),
            },
            Ok(None) => {
                self.open = false;
                Ok(FrameRead::Exhausted)
            }
            Err(e) => Err(GestoError::Io(e)),
        }
    }

    async fn release(&mut self) {
        self.open = false;
    }
}

// ── Replay feed ──────────────────────────────────────────────────────────────

/// Plays a recorded JSONL file back at a fixed rate. `None` entries in
/// the script are dropped frames, so a recorded dropout replays as a
/// dropout.
pub struct ReplayFeed {
    script: VecDeque<Option<FrameRecord>>,
    interval: Duration,
    last_frame: Option<Instant>,
    open: bool,
}

impl ReplayFeed {
    pub async fn open(path: &Path, fps: u32) -> Result<Self, GestoError> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Self::from_lines(&text, fps))
    }

    /// Build a feed directly from JSONL text.
    pub fn from_lines(text: &str, fps: u32) -> Self {
        let script = text.lines().map(FrameRecord::from_line).collect();
        Self {
            script,
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last_frame: None,
            open: true,
        }
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Hold the playback rate: sleep off whatever remains of the frame
    /// interval since the previous read.
    async fn pace(&mut self) {
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

#[async_trait]
impl FrameSource for ReplayFeed {
    type Frame = FrameRecord;

    fn is_open(&self) -> bool {
        self.open
    }

    async fn read_frame(&mut self) -> Result<FrameRead<FrameRecord>, GestoError> {
        if !self.open {
            return Ok(FrameRead::Exhausted);
        }
        match self.script.pop_front() {
            Some(entry) => {
                self.pace().await;
                match entry {
                    Some(record) => Ok(FrameRead::Frame(record)),
                    None => Ok(FrameRead::Missed),
                }
            }
            None => {
                self.open = false;
                Ok(FrameRead::Exhausted)
            }
        }
    }

    async fn release(&mut self) {
        self.open = false;
    }
}

// ── Unified feed ─────────────────────────────────────────────────────────────

/// The feed selected at startup. Both variants produce [`FrameRecord`]
/// frames, so the session is generic over this one type.
pub enum Feed {
    Stdin(StdinFeed),
    Replay(ReplayFeed),
}

#[async_trait]
impl FrameSource for Feed {
    type Frame = FrameRecord;

    fn is_open(&self) -> bool {
        match self {
            Feed::Stdin(feed) => feed.is_open(),
            Feed::Replay(feed) => feed.is_open(),
        }
    }

    async fn read_frame(&mut self) -> Result<FrameRead<FrameRecord>, GestoError> {
        match self {
            Feed::Stdin(feed) => feed.read_frame().await,
            Feed::Replay(feed) => feed.read_frame().await,
        }
    }

    async fn release(&mut self) {
        match self {
            Feed::Stdin(feed) => feed.release().await,
            Feed::Replay(feed) => feed.release().await,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
