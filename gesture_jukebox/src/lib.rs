//! # gesture_jukebox
//!
//! Hand-gesture controller for a local music playlist, with audio playback
//! through `rodio` and a software-rendered window.
//!
//! ## Gesture → Action mapping
//!
//! | Fingers shown | Action |
//! |---|---|
//! | 0 (fist) | Toggle play / pause |
//! | 1 | Next track (plays it) |
//! | 2 | Previous track (plays it) |
//! | 3 | Next page of the track list |
//! | 4 | Previous page of the track list |
//! | 5 (open hand) | Nothing |
//!
//! A changed finger count fires at once; holding a skip or page gesture
//! repeats its action at most once per cooldown, while a held fist toggles
//! only once (`debounce = "split"`).  Setting `debounce = "combined"`
//! requires both a change and an elapsed cooldown.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: number keys stand in for a hand.
//! * `leap`: **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `0`–`5` / hold | Show a hand with that many fingers |
//! | release | Hand leaves the view |
//! | `Up` / `Down` | Volume ±5 % |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod artwork;
pub mod camera;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gesture;
pub mod jukebox;
pub mod logging;
pub mod player;
pub mod session;
pub mod visualizer;
