//! Per-frame gesture → action loop.

use std::time::Instant;

use hand_gesture::{Action, GestureGate};

use crate::jukebox::{dispatch, Jukebox};
use crate::player::AudioDevice;

/// Feeds each frame's finger count through the [`GestureGate`] and applies
/// the admitted actions to a [`Jukebox`].
///
/// The gate is owned here and nowhere else; the jukebox is borrowed per
/// frame and only changed through its public operations.
pub struct GestureDispatcher {
    gate: GestureGate,
}

impl GestureDispatcher {
    pub fn new(gate: GestureGate) -> Self {
        GestureDispatcher { gate }
    }

    pub fn gate(&self) -> &GestureGate { &self.gate }

    /// Returns the action that fired on this frame, if any.
    ///
    /// With an empty playlist nothing fires and the gate is left untouched,
    /// as it is for counts with no bound action.
    pub fn on_frame<D: AudioDevice>(
        &mut self,
        finger_count: u8,
        now: Instant,
        jukebox: &mut Jukebox<D>,
    ) -> Option<Action> {
        if jukebox.is_empty() {
            return None;
        }
        let action = Action::from_finger_count(finger_count);
        if action.is_none() || !self.gate.admit(finger_count, now) {
            return None;
        }

        tracing::info!(finger_count, action = action.label(), "Gesture fired");
        dispatch(action, jukebox).then_some(action)
    }
}
