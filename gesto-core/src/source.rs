//! Collaborator seams: video source, hand detector, overlay.
//!
//! Camera capture, landmark detection, and on-screen drawing are
//! external engines. The session only needs three narrow contracts
//! from them, defined here so any engine (or a scripted stand-in for
//! tests) can plug in. The frame payload is an associated type — the
//! session never inspects pixels, it only hands frames from the source
//! to the detector and overlay.

use async_trait::async_trait;

use crate::error::GestoError;
use crate::gesture::MotionIntent;
use crate::landmark::HandSnapshot;

// ── FrameSource ──────────────────────────────────────────────────

/// Outcome of one read attempt against an open source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRead<F> {
    /// A usable frame.
    Frame(F),
    /// The source is still open but produced nothing this time.
    /// Transient — the caller skips the iteration and reads again.
    Missed,
    /// The source has no more frames and will never produce another.
    Exhausted,
}

/// A stream of video frames (camera, file replay, scripted test feed).
#[async_trait]
pub trait FrameSource: Send {
    type Frame: Send;

    /// Whether the source can still be read from.
    fn is_open(&self) -> bool;

    /// Pull the next frame. A `Missed` result is not an error and must
    /// not terminate the caller's loop.
    async fn read_frame(&mut self) -> Result<FrameRead<Self::Frame>, GestoError>;

    /// Release the underlying device or file. Idempotent: releasing a
    /// source that is already released is a no-op.
    async fn release(&mut self);
}

// ── HandDetector ─────────────────────────────────────────────────

/// Landmark detection engine: one frame in, zero or more hands out.
///
/// An empty result means no hand was in view — the ordinary case, not
/// an error.
pub trait HandDetector<F>: Send {
    fn detect(&mut self, frame: &F) -> Vec<HandSnapshot>;
}

// ── Overlay ──────────────────────────────────────────────────────

/// Optional visualization surface drawn once per processed frame.
///
/// Purely diagnostic: it receives what the pipeline saw and decided,
/// returns nothing, and cannot fail into the control loop.
pub trait Overlay<F>: Send {
    fn render(&mut self, frame: &F, hands: &[HandSnapshot], intent: Option<MotionIntent>);
}

/// Overlay that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl<F> Overlay<F> for NullOverlay {
    fn render(&mut self, _frame: &F, _hands: &[HandSnapshot], _intent: Option<MotionIntent>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_overlay_accepts_any_frame_type() {
        let mut overlay = NullOverlay;
        Overlay::<u32>::render(&mut overlay, &7, &[], None);
        Overlay::<String>::render(&mut overlay, &"frame".to_string(), &[], Some(MotionIntent::STOP));
    }

    #[test]
    fn frame_read_distinguishes_miss_from_exhaustion() {
        let miss: FrameRead<u8> = FrameRead::Missed;
        let done: FrameRead<u8> = FrameRead::Exhausted;
        assert_ne!(miss, done);
        assert!(matches!(FrameRead::Frame(1u8), FrameRead::Frame(_)));
    }
}
