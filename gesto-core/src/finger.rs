//! Per-finger open/closed derivation from landmark geometry.
//!
//! A finger is **open** when its tip sits strictly above its reference
//! joint on the vertical image axis (`tip.y < reference.y` — image
//! coordinates grow downward). The comparison is strict: a tip exactly
//! level with its reference reads as closed. No tolerance band, no
//! smoothing across frames.
//!
//! Reference joints differ per finger:
//!
//! | finger              | reference |
//! |---------------------|-----------|
//! | thumb               | IP joint  |
//! | index, middle, ring | PIP joint |
//! | pinky               | MCP joint |

use std::fmt;

use crate::landmark::{HandLandmark, HandSnapshot};

// ── Finger ───────────────────────────────────────────────────────

/// The five fingers, in thumb-to-pinky order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers in thumb-to-pinky order.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// The fingertip landmark.
    pub fn tip(self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbTip,
            Finger::Index => HandLandmark::IndexTip,
            Finger::Middle => HandLandmark::MiddleTip,
            Finger::Ring => HandLandmark::RingTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// The reference joint the tip is compared against.
    pub fn reference(self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbIp,
            Finger::Index => HandLandmark::IndexPip,
            Finger::Middle => HandLandmark::MiddlePip,
            Finger::Ring => HandLandmark::RingPip,
            Finger::Pinky => HandLandmark::PinkyMcp,
        }
    }

    /// Whether this finger reads as open in the given snapshot.
    pub fn is_open(self, snapshot: &HandSnapshot) -> bool {
        snapshot.point(self.tip()).y < snapshot.point(self.reference()).y
    }
}

// ── FingerState ──────────────────────────────────────────────────

/// Open/closed state of all five fingers for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    /// Derive the full vector from a snapshot.
    pub fn read(snapshot: &HandSnapshot) -> Self {
        Self {
            thumb: Finger::Thumb.is_open(snapshot),
            index: Finger::Index.is_open(snapshot),
            middle: Finger::Middle.is_open(snapshot),
            ring: Finger::Ring.is_open(snapshot),
            pinky: Finger::Pinky.is_open(snapshot),
        }
    }

    /// All five fingers open.
    pub fn all_open(&self) -> bool {
        self.thumb && self.index && self.middle && self.ring && self.pinky
    }

    /// All five fingers closed.
    pub fn all_closed(&self) -> bool {
        !self.thumb && !self.index && !self.middle && !self.ring && !self.pinky
    }
}

impl fmt::Display for FingerState {
    /// Compact `TIMRP` form, uppercase = open (e.g. `T---P`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |open: bool, c: char| if open { c } else { '-' };
        write!(
            f,
            "{}{}{}{}{}",
            mark(self.thumb, 'T'),
            mark(self.index, 'I'),
            mark(self.middle, 'M'),
            mark(self.ring, 'R'),
            mark(self.pinky, 'P'),
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{LANDMARK_COUNT, Point};

    /// Snapshot with every tip below its reference (all closed).
    fn closed_hand() -> HandSnapshot {
        let mut points = [Point::default(); LANDMARK_COUNT];
        for finger in Finger::ALL {
            points[finger.reference().index()] = Point::new(0.5, 0.5, 0.0);
            points[finger.tip().index()] = Point::new(0.5, 0.7, 0.0);
        }
        HandSnapshot::new(points)
    }

    fn open_finger(snap: &mut [Point; LANDMARK_COUNT], finger: Finger) {
        // Tip strictly above the reference.
        snap[finger.tip().index()] = Point::new(0.5, 0.3, 0.0);
    }

    #[test]
    fn reference_joints_per_finger() {
        assert_eq!(Finger::Thumb.reference(), HandLandmark::ThumbIp);
        assert_eq!(Finger::Index.reference(), HandLandmark::IndexPip);
        assert_eq!(Finger::Middle.reference(), HandLandmark::MiddlePip);
        assert_eq!(Finger::Ring.reference(), HandLandmark::RingPip);
        assert_eq!(Finger::Pinky.reference(), HandLandmark::PinkyMcp);
    }

    #[test]
    fn closed_hand_reads_all_closed() {
        let state = FingerState::read(&closed_hand());
        assert!(state.all_closed());
        assert!(!state.all_open());
    }

    #[test]
    fn single_open_finger() {
        let mut points = *closed_hand().points();
        open_finger(&mut points, Finger::Index);

        let state = FingerState::read(&HandSnapshot::new(points));
        assert!(state.index);
        assert!(!state.thumb);
        assert!(!state.middle);
        assert!(!state.ring);
        assert!(!state.pinky);
    }

    #[test]
    fn tip_level_with_reference_is_closed() {
        let mut points = *closed_hand().points();
        // Exactly level — strict comparison reads closed.
        points[Finger::Middle.tip().index()] = Point::new(0.5, 0.5, 0.0);

        let state = FingerState::read(&HandSnapshot::new(points));
        assert!(!state.middle);
    }

    #[test]
    fn all_open_when_every_tip_above() {
        let mut points = *closed_hand().points();
        for finger in Finger::ALL {
            open_finger(&mut points, finger);
        }

        let state = FingerState::read(&HandSnapshot::new(points));
        assert!(state.all_open());
        assert!(!state.all_closed());
    }

    #[test]
    fn display_format() {
        let state = FingerState {
            thumb: true,
            index: false,
            middle: false,
            ring: false,
            pinky: true,
        };
        assert_eq!(state.to_string(), "T---P");
        assert_eq!(
            FingerState::read(&closed_hand()).to_string(),
            "-----"
        );
    }
}
