//! # hand_gesture
//!
//! Turns hand landmarks into discrete, debounced jukebox actions.
//!
//! ```text
//! Frame ──► HandLandmarker ──► FingerCounter ──► u8 count
//!                                                 │
//!                        Action::from_finger_count ◄┘
//!                                                 │
//!                               GestureGate::admit ──► fire / suppress
//! ```
//!
//! ## Finger count → Action
//!
//! | Fingers shown | Action |
//! |---|---|
//! | 0 (fist) | Toggle play / pause |
//! | 1 | Next track |
//! | 2 | Previous track |
//! | 3 | Next page of the track list |
//! | 4 | Previous page of the track list |
//! | 5 (open hand) | Nothing |
//!
//! Nothing here does I/O; landmark detection is behind the
//! [`HandLandmarker`] trait so hardware, simulation and test doubles plug in
//! the same way.

pub mod action;
pub mod counter;
pub mod frame;
pub mod gate;
pub mod landmarks;

pub use action::Action;
pub use counter::{count_extended, FingerCounter, HandLandmarker};
pub use frame::Frame;
pub use gate::{DebounceMode, GestureGate};
pub use landmarks::{Hand, Handedness, Landmark};
