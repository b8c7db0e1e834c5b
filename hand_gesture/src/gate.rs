//! Debounce / edge detection for the noisy per-frame finger count.
//!
//! Webcam counts jitter from frame to frame; firing on every frame would
//! trigger dozens of actions per held gesture.  [`GestureGate`] decides which
//! frames are allowed through.
//!
//! Two policies are available:
//!
//! * [`DebounceMode::Split`]: a count that differs from the last fired one
//!   passes at once; the same count passes again only after the cooldown,
//!   and only if its action [repeats](Action::repeats).  A held skip or page
//!   gesture repeats at most once per cooldown; a held fist fires once.
//! * [`DebounceMode::Combined`]: a count passes only if it differs from the
//!   last fired one *and* the cooldown since the last action has elapsed.
//!   A held gesture never repeats; a new gesture inside the cooldown is
//!   dropped.

use std::time::{Duration, Instant};

use crate::action::Action;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DebounceMode {
    #[default]
    Split,
    Combined,
}

impl std::str::FromStr for DebounceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "split"    => Ok(DebounceMode::Split),
            "combined" => Ok(DebounceMode::Combined),
            other      => Err(format!("unknown debounce mode '{other}' (expected split or combined)")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GestureGate {
    cooldown:    Duration,
    mode:        DebounceMode,
    last_stable: Option<u8>,
    last_action: Option<Instant>,
}

impl GestureGate {
    pub fn new(cooldown: Duration, mode: DebounceMode) -> Self {
        GestureGate { cooldown, mode, last_stable: None, last_action: None }
    }

    pub fn cooldown(&self)    -> Duration     { self.cooldown }
    pub fn mode(&self)        -> DebounceMode { self.mode }
    pub fn last_stable(&self) -> Option<u8>   { self.last_stable }

    /// Decide whether `count`, seen at `now`, may fire.  When it may, the
    /// gate records it as the new stable gesture; otherwise nothing changes.
    pub fn admit(&mut self, count: u8, now: Instant) -> bool {
        let cooled = match self.last_action {
            Some(at) => now.saturating_duration_since(at) > self.cooldown,
            None     => true,
        };
        let changed = self.last_stable != Some(count);

        let pass = match self.mode {
            DebounceMode::Split    => {
                changed || (cooled && Action::from_finger_count(count).repeats())
            }
            DebounceMode::Combined => changed && cooled,
        };

        if pass {
            self.last_stable = Some(count);
            self.last_action = Some(now);
        } else {
            tracing::trace!(count, changed, cooled, "Gesture suppressed");
        }
        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COOLDOWN: Duration = Duration::from_secs(1);

    fn at(t0: Instant, ms: u64) -> Instant { t0 + Duration::from_millis(ms) }

    #[test]
    fn first_gesture_always_fires() {
        let t0 = Instant::now();
        assert!(GestureGate::new(COOLDOWN, DebounceMode::Split).admit(1, t0));
        assert!(GestureGate::new(COOLDOWN, DebounceMode::Combined).admit(1, t0));
    }

    #[test]
    fn split_repeat_waits_for_cooldown() {
        let t0 = Instant::now();
        let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Split);
        assert!(gate.admit(1, t0));
        assert!(!gate.admit(1, at(t0, 500)));
        assert!(!gate.admit(1, at(t0, 1000)));
        assert!(gate.admit(1, at(t0, 1500)));
    }

    #[test]
    fn split_new_gesture_fires_immediately() {
        let t0 = Instant::now();
        let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Split);
        assert!(gate.admit(1, t0));
        assert!(gate.admit(2, at(t0, 30)));
        assert_eq!(gate.last_stable(), Some(2));
    }

    #[test]
    fn split_held_fist_fires_once() {
        let t0 = Instant::now();
        let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Split);
        assert!(gate.admit(0, t0));
        assert!(!gate.admit(0, at(t0, 1500)));
        assert!(!gate.admit(0, at(t0, 5000)));
        // A different gesture in between re-arms the fist.
        assert!(gate.admit(1, at(t0, 5100)));
        assert!(gate.admit(0, at(t0, 5200)));
    }

    #[test]
    fn combined_drops_new_gesture_inside_cooldown() {
        let t0 = Instant::now();
        let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Combined);
        assert!(gate.admit(1, t0));
        assert!(!gate.admit(2, at(t0, 500)));
        // Suppressed frames leave the state alone.
        assert_eq!(gate.last_stable(), Some(1));
        assert!(gate.admit(2, at(t0, 1200)));
    }

    #[test]
    fn combined_never_repeats_held_gesture() {
        let t0 = Instant::now();
        let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Combined);
        assert!(gate.admit(0, t0));
        assert!(!gate.admit(0, at(t0, 5_000)));
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("split".parse::<DebounceMode>(), Ok(DebounceMode::Split));
        assert_eq!("Combined".parse::<DebounceMode>(), Ok(DebounceMode::Combined));
        assert!("sometimes".parse::<DebounceMode>().is_err());
    }

    proptest! {
        /// Feeding a constant count at a fixed frame rate fires at most once
        /// per cooldown window.
        #[test]
        fn held_gesture_rate_limited(count in 0u8..6, frame_ms in 1u64..100, frames in 1usize..300) {
            let t0 = Instant::now();
            let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Split);
            let mut fired: Vec<u64> = Vec::new();
            for i in 0..frames {
                let t = i as u64 * frame_ms;
                if gate.admit(count, at(t0, t)) { fired.push(t); }
            }
            prop_assert!(!fired.is_empty());
            for pair in fired.windows(2) {
                prop_assert!(pair[1] - pair[0] > COOLDOWN.as_millis() as u64);
            }
        }

        /// The first frame showing a different count fires, whatever the timing.
        #[test]
        fn changed_gesture_fires_first_frame(a in 0u8..6, b in 0u8..6, gap_ms in 0u64..2000) {
            prop_assume!(a != b);
            let t0 = Instant::now();
            let mut gate = GestureGate::new(COOLDOWN, DebounceMode::Split);
            prop_assert!(gate.admit(a, t0));
            prop_assert!(gate.admit(b, at(t0, gap_ms)));
        }
    }
}
