//! Hand landmark model.
//!
//! A detector observation is a fixed set of 21 named anatomical points
//! per hand (wrist, four thumb joints, four joints per finger), in
//! image-relative coordinates where `y` grows downward. The snapshot
//! type wraps a `[Point; 21]`, so an observation with missing or extra
//! landmarks is unrepresentable.

use serde::{Deserialize, Serialize};

/// Number of landmarks in one hand observation.
pub const LANDMARK_COUNT: usize = 21;

// ── HandLandmark ─────────────────────────────────────────────────

/// Named index into a hand observation.
///
/// Discriminants follow the standard 21-point hand topology:
/// - `0` — wrist
/// - `1..=4` — thumb, base to tip
/// - `5..=8`, `9..=12`, `13..=16` — index, middle, ring
/// - `17..=20` — pinky
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist = 0,

    // ── Thumb ────────────────────────────────────────────────────
    ThumbCmc = 1,
    ThumbMcp = 2,
    /// Interphalangeal joint — the thumb's openness reference.
    ThumbIp = 3,
    ThumbTip = 4,

    // ── Index ────────────────────────────────────────────────────
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,

    // ── Middle ───────────────────────────────────────────────────
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,

    // ── Ring ─────────────────────────────────────────────────────
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,

    // ── Pinky ────────────────────────────────────────────────────
    /// Metacarpophalangeal joint — the pinky's openness reference.
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// Position of this landmark within a snapshot.
    pub fn index(self) -> usize {
        self as usize
    }
}

// ── Point ────────────────────────────────────────────────────────

/// One landmark position in image-relative coordinates.
///
/// `x` and `y` are normalized to the frame (`0.0..=1.0` from a typical
/// detector); `y` grows downward, so a smaller `y` is higher in the
/// image. `z` is relative depth and unused by classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// ── HandSnapshot ─────────────────────────────────────────────────

/// One complete hand observation: 21 landmarks, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSnapshot {
    points: [Point; LANDMARK_COUNT],
}

impl HandSnapshot {
    /// Build a snapshot from a full set of landmark positions, ordered
    /// by [`HandLandmark`] discriminant.
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Position of a named landmark.
    pub fn point(&self, landmark: HandLandmark) -> Point {
        self.points[landmark.index()]
    }

    /// All landmark positions in topology order.
    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_indices_cover_topology() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbIp.index(), 3);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexPip.index(), 6);
        assert_eq!(HandLandmark::PinkyMcp.index(), 17);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
    }

    #[test]
    fn snapshot_lookup_by_name() {
        let mut points = [Point::default(); LANDMARK_COUNT];
        points[HandLandmark::IndexTip.index()] = Point::new(0.4, 0.2, 0.0);

        let snap = HandSnapshot::new(points);
        assert_eq!(snap.point(HandLandmark::IndexTip).y, 0.2);
        assert_eq!(snap.point(HandLandmark::Wrist), Point::default());
    }

    #[test]
    fn point_deserializes_without_z() {
        let p: Point = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(p.x, 0.5);
        assert_eq!(p.z, 0.0);
    }
}
