//! Per-frame finger counting.

use crate::frame::Frame;
use crate::landmarks::{Hand, Handedness, FINGER_TIPS, HAND_CONNECTIONS, THUMB_IP, THUMB_TIP};

const BONE_COLOR:  u32 = 0xFFFFFFFF;
const JOINT_COLOR: u32 = 0xFFFF3030;

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarker: the detector seam
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can find hands in a frame.
///
/// Implementations may ignore the frame entirely (e.g. a tracker with its own
/// sensor); they must return every hand they see, in any order.
pub trait HandLandmarker {
    fn detect(&mut self, frame: &Frame) -> Vec<Hand>;
}

impl<L: HandLandmarker + ?Sized> HandLandmarker for Box<L> {
    fn detect(&mut self, frame: &Frame) -> Vec<Hand> {
        (**self).detect(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

/// Count the extended fingers on one hand (0–5).
///
/// * Thumb: tip lies outside its IP joint horizontally.  For a left hand the
///   outside is to the right; right and unknown hands use the left.
/// * Other fingers: tip is above (smaller `y`) the PIP joint two landmarks
///   below it.
pub fn count_extended(hand: &Hand) -> u8 {
    let lm = &hand.landmarks;

    let thumb = match hand.handedness {
        Handedness::Left => lm[THUMB_TIP].x > lm[THUMB_IP].x,
        Handedness::Right | Handedness::Unknown => lm[THUMB_TIP].x < lm[THUMB_IP].x,
    };

    let fingers = FINGER_TIPS
        .iter()
        .filter(|&&tip| lm[tip].y < lm[tip - 2].y)
        .count() as u8;

    fingers + u8::from(thumb)
}

// ════════════════════════════════════════════════════════════════════════════
// FingerCounter
// ════════════════════════════════════════════════════════════════════════════

/// Wraps a [`HandLandmarker`] and reduces each frame to a finger count.
///
/// Only the most confident hand is counted; any other hands are ignored.
/// There is no memory between calls.
pub struct FingerCounter<L> {
    landmarker: L,
    annotate:   bool,
}

impl<L: HandLandmarker> FingerCounter<L> {
    pub fn new(landmarker: L, annotate: bool) -> Self {
        FingerCounter { landmarker, annotate }
    }

    pub fn landmarker_mut(&mut self) -> &mut L { &mut self.landmarker }

    /// Returns the (possibly annotated) frame and the finger count.
    /// With no hand in view the count is 0 and the frame is untouched.
    pub fn count(&mut self, mut frame: Frame) -> (Frame, u8) {
        let hands = self.landmarker.detect(&frame);
        let Some(hand) = hands
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        else {
            return (frame, 0);
        };

        if self.annotate {
            draw_hand(&mut frame, &hand);
        }
        (frame, count_extended(&hand))
    }
}

fn draw_hand(frame: &mut Frame, hand: &Hand) {
    let points: Vec<(isize, isize)> = hand
        .landmarks
        .iter()
        .map(|l| frame.to_pixel(l.x, l.y))
        .collect();

    for &(a, b) in &HAND_CONNECTIONS {
        frame.draw_line(points[a], points[b], BONE_COLOR);
    }
    for &(x, y) in &points {
        frame.draw_dot(x, y, 3, JOINT_COLOR);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    /// Returns a fixed set of hands regardless of the frame.
    struct Scripted(Vec<Hand>);

    impl HandLandmarker for Scripted {
        fn detect(&mut self, _frame: &Frame) -> Vec<Hand> { self.0.clone() }
    }

    fn blank() -> Frame { Frame::new(64, 48, 0xFF000000) }

    #[test]
    fn counts_every_synthetic_pose() {
        for n in 0..=5u8 {
            assert_eq!(count_extended(&Hand::showing(n)), n, "pose {n}");
        }
    }

    #[test]
    fn thumb_rule_flips_for_left_hand() {
        let right = Hand::synthetic([true, false, false, false, false]);
        let left  = right.clone().with_handedness(Handedness::Left);
        assert_eq!(count_extended(&right), 1);
        assert_eq!(count_extended(&left), 0);
    }

    #[test]
    fn finger_level_with_pip_is_not_extended() {
        let mut hand = Hand::showing(1);
        hand.landmarks[8] = Landmark::new(hand.landmarks[8].x, hand.landmarks[6].y);
        assert_eq!(count_extended(&hand), 0);
    }

    #[test]
    fn no_hand_is_zero_and_unannotated() {
        let mut counter = FingerCounter::new(Scripted(vec![]), true);
        let (frame, n) = counter.count(blank());
        assert_eq!(n, 0);
        assert_eq!(frame, blank());
    }

    #[test]
    fn most_confident_hand_wins() {
        let mut weak = Hand::showing(4);
        weak.confidence = 0.4;
        let mut strong = Hand::showing(2);
        strong.confidence = 0.9;
        let mut counter = FingerCounter::new(Scripted(vec![weak, strong]), false);
        assert_eq!(counter.count(blank()).1, 2);
    }

    #[test]
    fn annotation_draws_on_frame() {
        let mut counter = FingerCounter::new(Scripted(vec![Hand::showing(3)]), true);
        let (frame, n) = counter.count(blank());
        assert_eq!(n, 3);
        assert_ne!(frame, blank());
    }

    #[test]
    fn annotation_can_be_disabled() {
        let mut counter = FingerCounter::new(Scripted(vec![Hand::showing(3)]), false);
        let (frame, _) = counter.count(blank());
        assert_eq!(frame, blank());
    }

    #[test]
    fn boxed_landmarker_delegates() {
        let boxed: Box<dyn HandLandmarker> = Box::new(Scripted(vec![Hand::showing(5)]));
        let mut counter = FingerCounter::new(boxed, false);
        assert_eq!(counter.count(blank()).1, 5);
    }
}
