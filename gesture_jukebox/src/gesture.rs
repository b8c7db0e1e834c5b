//! Hand landmark sources: LeapMotion hardware and keyboard simulation.
//!
//! Both implement [`HandLandmarker`], so the finger counter does not know
//! whether the hand came from a sensor or from the number keys.

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_gesture::{Frame, Hand, HandLandmarker};

// ════════════════════════════════════════════════════════════════════════════
// SimHandLandmarker: keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    /// A number key went down: show a hand with this many fingers.
    ShowFingers(u8),
    /// The number key was released: the hand leaves the view.
    HideHand,
}

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// Events are drained without blocking at the start of every `detect`, on
/// the same thread as the control loop.  The pose persists until the next
/// event, like a hand held in front of a camera.
pub struct SimHandLandmarker {
    rx:   Receiver<SimInput>,
    pose: Option<u8>,
}

impl SimHandLandmarker {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimHandLandmarker { rx, pose: None }
    }

    pub fn pose(&self) -> Option<u8> { self.pose }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::ShowFingers(n)) => self.pose = Some(n.min(5)),
                Ok(SimInput::HideHand)       => self.pose = None,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl HandLandmarker for SimHandLandmarker {
    fn detect(&mut self, _frame: &Frame) -> Vec<Hand> {
        self.drain();
        self.pose.map(Hand::showing).into_iter().collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarker: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each call polls one tracking event and projects every hand's bone joints
/// onto the image plane: Leap `x` (mm, right) → image `x`, Leap `y` (mm, up)
/// → image `y` flipped.  Joints map onto the 21-point layout as wrist, then
/// per digit the metacarpal/proximal/intermediate/distal joints.
#[cfg(feature = "leap")]
pub struct LeapLandmarker {
    connection: leaprs::Connection,
}

#[cfg(feature = "leap")]
impl LeapLandmarker {
    /// Interaction box, in millimetres, mapped onto the unit square.
    const X_RANGE: (f32, f32) = (-200.0, 200.0);
    const Y_RANGE: (f32, f32) = (80.0, 480.0);

    pub fn open() -> Result<Self, String> {
        use leaprs::*;
        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| format!("LeapC connection: {e:?}"))?;
        connection.open().map_err(|e| format!("LeapMotion device: {e:?}"))?;
        tracing::info!("LeapMotion connection opened");
        Ok(LeapLandmarker { connection })
    }

    fn project(x: f32, y: f32) -> hand_gesture::Landmark {
        let nx = (x - Self::X_RANGE.0) / (Self::X_RANGE.1 - Self::X_RANGE.0);
        let ny = 1.0 - (y - Self::Y_RANGE.0) / (Self::Y_RANGE.1 - Self::Y_RANGE.0);
        hand_gesture::Landmark::new(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0))
    }
}

#[cfg(feature = "leap")]
impl HandLandmarker for LeapLandmarker {
    fn detect(&mut self, _frame: &Frame) -> Vec<Hand> {
        use hand_gesture::{Handedness, Landmark};
        use leaprs::*;

        let msg = match self.connection.poll(10) {
            Ok(m)  => m,
            Err(_) => return Vec::new(),
        };
        let Event::Tracking(frame) = msg.event() else { return Vec::new(); };

        frame
            .hands()
            .map(|hand| {
                let mut lm = [Landmark::default(); 21];
                let palm = hand.palm().position();
                lm[0] = Self::project(palm.x, palm.y - 40.0);

                for (d, digit) in hand.digits().enumerate().take(5) {
                    let base = 1 + d * 4;
                    // Leap's thumb metacarpal has zero length, so for every
                    // digit the proximal base is the first landmark.
                    let joints = [
                        digit.proximal().prev_joint(),
                        digit.intermediate().prev_joint(),
                        digit.distal().prev_joint(),
                        digit.distal().next_joint(),
                    ];
                    for (j, joint) in joints.iter().enumerate() {
                        lm[base + j] = Self::project(joint.x, joint.y);
                    }
                }

                let handedness = match hand.hand_type() {
                    HandType::Left  => Handedness::Left,
                    HandType::Right => Handedness::Right,
                };
                Hand::new(lm, hand.confidence()).with_handedness(handedness)
            })
            .collect()
    }
}

#[cfg(feature = "leap")]
impl Drop for LeapLandmarker {
    fn drop(&mut self) {
        tracing::info!("LeapMotion connection released");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn frame() -> Frame { Frame::new(8, 8, 0) }

    #[test]
    fn no_input_means_no_hand() {
        let (_tx, rx) = mpsc::channel();
        let mut sim = SimHandLandmarker::new(rx);
        assert!(sim.detect(&frame()).is_empty());
    }

    #[test]
    fn pose_persists_until_hidden() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimHandLandmarker::new(rx);
        tx.send(SimInput::ShowFingers(2)).unwrap();
        assert_eq!(sim.detect(&frame()).len(), 1);
        assert_eq!(sim.detect(&frame()).len(), 1);
        assert_eq!(sim.pose(), Some(2));

        tx.send(SimInput::HideHand).unwrap();
        assert!(sim.detect(&frame()).is_empty());
    }

    #[test]
    fn latest_event_wins_within_a_frame() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimHandLandmarker::new(rx);
        tx.send(SimInput::ShowFingers(1)).unwrap();
        tx.send(SimInput::ShowFingers(9)).unwrap();
        let hands = sim.detect(&frame());
        assert_eq!(hand_gesture::count_extended(&hands[0]), 5);
    }

    #[test]
    fn closed_channel_keeps_last_pose() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimHandLandmarker::new(rx);
        tx.send(SimInput::ShowFingers(3)).unwrap();
        drop(tx);
        assert_eq!(sim.detect(&frame()).len(), 1);
    }
}
