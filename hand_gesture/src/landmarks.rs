//! 21-point hand landmark model.
//!
//! Index layout (the de-facto standard used by hand-tracking models):
//!
//! ```text
//!            8   12  16  20      ← tips
//!            7   11  15  19      ← DIP
//!      4     6   10  14  18      ← PIP   (thumb: 4 tip, 3 IP)
//!     3      5    9  13  17      ← MCP   (thumb: 2 MCP, 1 CMC)
//!    2
//!   1            0               ← wrist
//! ```
//!
//! Coordinates are normalized to the image: `x` grows to the right, `y`
//! grows downward.

pub const WRIST:      usize = 0;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
/// Tips of index, middle, ring and pinky.
pub const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];

/// Bones drawn by the landmark overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self { Landmark { x, y } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub landmarks:  [Landmark; 21],
    /// Detector confidence, 0.0–1.0.
    pub confidence: f32,
    pub handedness: Handedness,
}

impl Hand {
    pub fn new(landmarks: [Landmark; 21], confidence: f32) -> Self {
        Hand { landmarks, confidence, handedness: Handedness::Unknown }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    /// A synthetic, upright hand raising the fingers flagged in `raised`
    /// (thumb, index, middle, ring, pinky).  Used by the keyboard simulator
    /// and by tests.
    pub fn synthetic(raised: [bool; 5]) -> Self {
        let mut lm = [Landmark::default(); 21];
        lm[WRIST] = Landmark::new(0.50, 0.85);

        // Thumb sweeps out to the left when extended, tucks across the palm
        // when curled.
        lm[1] = Landmark::new(0.44, 0.80);
        lm[2] = Landmark::new(0.40, 0.74);
        lm[THUMB_IP] = Landmark::new(0.37, 0.69);
        lm[THUMB_TIP] = if raised[0] {
            Landmark::new(0.33, 0.65)
        } else {
            Landmark::new(0.43, 0.68)
        };

        for (finger, &tip) in FINGER_TIPS.iter().enumerate() {
            let x   = 0.42 + 0.055 * finger as f32;
            let mcp = tip - 3;
            lm[mcp] = Landmark::new(x, 0.65);
            if raised[finger + 1] {
                lm[mcp + 1] = Landmark::new(x, 0.55);
                lm[mcp + 2] = Landmark::new(x, 0.48);
                lm[tip]     = Landmark::new(x, 0.42);
            } else {
                lm[mcp + 1] = Landmark::new(x, 0.60);
                lm[mcp + 2] = Landmark::new(x, 0.66);
                lm[tip]     = Landmark::new(x, 0.69);
            }
        }

        Hand::new(lm, 1.0)
    }

    /// A synthetic hand showing `fingers` raised fingers: index first, then
    /// middle, ring, pinky, and the thumb last.
    pub fn showing(fingers: u8) -> Self {
        let n = fingers.min(5);
        Hand::synthetic([n >= 5, n >= 1, n >= 2, n >= 3, n >= 4])
    }
}
