/// What a recognised gesture asks the jukebox to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Closed fist.
    TogglePlay,
    NextTrack,
    PreviousTrack,
    NextPage,
    PreviousPage,
    /// Counts with no binding (5 fingers, or anything out of range).
    None,
}

impl Action {
    pub fn from_finger_count(count: u8) -> Action {
        match count {
            0 => Action::TogglePlay,
            1 => Action::NextTrack,
            2 => Action::PreviousTrack,
            3 => Action::NextPage,
            4 => Action::PreviousPage,
            _ => Action::None,
        }
    }

    pub fn is_none(self) -> bool { self == Action::None }

    /// Whether holding the gesture keeps firing after each cooldown.
    /// Play/pause is a toggle, so a held fist fires once.
    pub fn repeats(self) -> bool {
        !matches!(self, Action::TogglePlay | Action::None)
    }

    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Action::TogglePlay    => "toggle play",
            Action::NextTrack     => "next track",
            Action::PreviousTrack => "previous track",
            Action::NextPage      => "next page",
            Action::PreviousPage  => "previous page",
            Action::None          => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_table() {
        assert_eq!(Action::from_finger_count(0), Action::TogglePlay);
        assert_eq!(Action::from_finger_count(1), Action::NextTrack);
        assert_eq!(Action::from_finger_count(2), Action::PreviousTrack);
        assert_eq!(Action::from_finger_count(3), Action::NextPage);
        assert_eq!(Action::from_finger_count(4), Action::PreviousPage);
        assert!(Action::from_finger_count(5).is_none());
        assert!(Action::from_finger_count(200).is_none());
    }

    #[test]
    fn only_navigation_repeats() {
        assert!(!Action::TogglePlay.repeats());
        assert!(!Action::None.repeats());
        for count in 1..=4 {
            assert!(Action::from_finger_count(count).repeats());
        }
    }
}
