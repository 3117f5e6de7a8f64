//! Gesture classification — finger-state vector to motion intent.
//!
//! Classification is a single pass over an ordered rule table. Each
//! rule pairs a predicate over the five-finger vector with the motion
//! intent it produces; the first matching rule wins and at most one
//! intent is produced per snapshot. A vector no rule matches produces
//! nothing — an idle hand is not an error.
//!
//! Table order is authoritative. `open-palm` and `fist` must sit above
//! the thumb/pinky rules or they would be shadowed by them.

use crate::finger::FingerState;
use crate::landmark::HandSnapshot;

// ── MotionIntent ─────────────────────────────────────────────────

/// One discrete motion command for the robot: a direction in degrees
/// and a speed in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionIntent {
    /// Direction of travel in degrees.
    pub angle: u16,
    /// Drive speed, `0` = stopped.
    pub speed: u8,
}

impl MotionIntent {
    /// Stand still.
    pub const STOP: Self = Self { angle: 0, speed: 0 };
    /// Drive straight ahead at half speed.
    pub const FORWARD: Self = Self { angle: 0, speed: 50 };
    /// Veer toward the thumb side of the hand.
    pub const TURN_THUMB_SIDE: Self = Self {
        angle: 45,
        speed: 50,
    };
    /// Veer toward the pinky side of the hand.
    pub const TURN_PINKY_SIDE: Self = Self {
        angle: 135,
        speed: 50,
    };
}

// ── Rule table ───────────────────────────────────────────────────

/// One row of the classification table.
pub struct GestureRule {
    /// Stable gesture name for diagnostics.
    pub name: &'static str,
    /// Predicate over the finger vector.
    pub matches: fn(FingerState) -> bool,
    /// Intent produced when the predicate holds.
    pub intent: MotionIntent,
}

/// The classification table, highest priority first.
pub static RULES: [GestureRule; 5] = [
    GestureRule {
        name: "open-palm",
        matches: |s| s.all_open(),
        intent: MotionIntent::STOP,
    },
    GestureRule {
        name: "fist",
        matches: |s| s.all_closed(),
        intent: MotionIntent::FORWARD,
    },
    GestureRule {
        name: "thumb-out",
        matches: |s| s.thumb && !s.pinky,
        intent: MotionIntent::TURN_THUMB_SIDE,
    },
    GestureRule {
        name: "pinky-out",
        matches: |s| s.pinky && !s.thumb,
        intent: MotionIntent::TURN_PINKY_SIDE,
    },
    GestureRule {
        name: "shaka",
        matches: |s| s.thumb && s.pinky,
        intent: MotionIntent::STOP,
    },
];

// ── GestureClassifier ────────────────────────────────────────────

/// Stateless snapshot-to-intent classifier.
///
/// Constructed explicitly and owned by whoever drives the control
/// loop, so parallel sessions (and tests) never share state through
/// it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GestureClassifier;

impl GestureClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one hand observation. Returns the intent of the first
    /// matching rule, or `None` when no rule matches.
    pub fn classify(&self, snapshot: &HandSnapshot) -> Option<MotionIntent> {
        self.classify_state(FingerState::read(snapshot))
            .map(|rule| rule.intent)
    }

    /// Table lookup over an already-derived finger vector. Exposes the
    /// matched rule so callers can report the gesture by name.
    pub fn classify_state(&self, state: FingerState) -> Option<&'static GestureRule> {
        RULES.iter().find(|rule| (rule.matches)(state))
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger::Finger;
    use crate::landmark::{HandSnapshot, LANDMARK_COUNT, Point};

    fn state(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> FingerState {
        FingerState {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Synthetic snapshot with the given fingers open.
    fn snapshot_with_open(open: [bool; 5]) -> HandSnapshot {
        let mut points = [Point::default(); LANDMARK_COUNT];
        for (finger, is_open) in Finger::ALL.into_iter().zip(open) {
            points[finger.reference().index()] = Point::new(0.5, 0.5, 0.0);
            points[finger.tip().index()] = if is_open {
                Point::new(0.5, 0.3, 0.0)
            } else {
                Point::new(0.5, 0.7, 0.0)
            };
        }
        HandSnapshot::new(points)
    }

    #[test]
    fn open_palm_stops() {
        let classifier = GestureClassifier::new();
        let intent = classifier.classify(&snapshot_with_open([true; 5]));
        assert_eq!(intent, Some(MotionIntent::STOP));
    }

    #[test]
    fn fist_drives_forward() {
        let classifier = GestureClassifier::new();
        let intent = classifier.classify(&snapshot_with_open([false; 5]));
        assert_eq!(intent, Some(MotionIntent::FORWARD));
    }

    #[test]
    fn thumb_out_turns_thumb_side() {
        let classifier = GestureClassifier::new();
        let intent = classifier.classify(&snapshot_with_open([true, false, false, false, false]));
        assert_eq!(intent, Some(MotionIntent::TURN_THUMB_SIDE));
    }

    #[test]
    fn pinky_out_turns_pinky_side() {
        let classifier = GestureClassifier::new();
        let intent = classifier.classify(&snapshot_with_open([false, false, false, false, true]));
        assert_eq!(intent, Some(MotionIntent::TURN_PINKY_SIDE));
    }

    #[test]
    fn shaka_stops() {
        let classifier = GestureClassifier::new();
        let intent = classifier.classify(&snapshot_with_open([true, false, false, false, true]));
        assert_eq!(intent, Some(MotionIntent::STOP));
    }

    #[test]
    fn unmatched_vector_yields_nothing() {
        let classifier = GestureClassifier::new();
        // Index only: thumb and pinky both closed, not a fist.
        let intent = classifier.classify(&snapshot_with_open([false, true, false, false, false]));
        assert_eq!(intent, None);
    }

    #[test]
    fn open_palm_outranks_thumb_and_pinky_rules() {
        // All-open satisfies the shaka predicate too; the table must
        // resolve it to open-palm.
        let classifier = GestureClassifier::new();
        let rule = classifier.classify_state(state(true, true, true, true, true)).unwrap();
        assert_eq!(rule.name, "open-palm");
    }

    #[test]
    fn thumb_rule_applies_with_middle_fingers_open() {
        // Not all-open, thumb open, pinky closed: middle fingers are
        // irrelevant to the thumb-out rule.
        let classifier = GestureClassifier::new();
        let rule = classifier.classify_state(state(true, true, true, false, false)).unwrap();
        assert_eq!(rule.name, "thumb-out");
        assert_eq!(rule.intent, MotionIntent::TURN_THUMB_SIDE);
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = GestureClassifier::new();
        let snap = snapshot_with_open([true, false, true, false, true]);
        let first = classifier.classify(&snap);
        let second = classifier.classify(&snap);
        assert_eq!(first, second);
    }

    #[test]
    fn exhaustive_vector_sweep_matches_priority_chain() {
        // Oracle: the priority chain written out longhand.
        fn expected(s: FingerState) -> Option<MotionIntent> {
            if s.all_open() {
                Some(MotionIntent::STOP)
            } else if s.all_closed() {
                Some(MotionIntent::FORWARD)
            } else if s.thumb && !s.pinky {
                Some(MotionIntent::TURN_THUMB_SIDE)
            } else if s.pinky && !s.thumb {
                Some(MotionIntent::TURN_PINKY_SIDE)
            } else if s.thumb && s.pinky {
                Some(MotionIntent::STOP)
            } else {
                None
            }
        }

        let classifier = GestureClassifier::new();
        for bits in 0u8..32 {
            let s = state(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            );
            let got = classifier.classify_state(s).map(|r| r.intent);
            assert_eq!(got, expected(s), "vector {s}");
        }
    }

    #[test]
    fn snapshot_and_state_paths_agree() {
        let classifier = GestureClassifier::new();
        let open = [true, false, false, false, false];
        let snap = snapshot_with_open(open);

        let via_snapshot = classifier.classify(&snap);
        let via_state = classifier
            .classify_state(FingerState::read(&snap))
            .map(|r| r.intent);
        assert_eq!(via_snapshot, via_state);
    }
}
