//! End-to-end: a music directory on disk, simulated hands, and the
//! dispatcher driving a jukebox over a recording audio device.

use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use gesture_jukebox::app::{build_jukebox, page_entries, page_label};
use gesture_jukebox::config::AppConfig;
use gesture_jukebox::dispatcher::GestureDispatcher;
use gesture_jukebox::gesture::{SimHandLandmarker, SimInput};
use gesture_jukebox::jukebox::{Jukebox, NO_TRACKS};
use gesture_jukebox::player::{DeviceCall, NullDevice, RecordingDevice};
use hand_gesture::{Action, DebounceMode, FingerCounter, Frame, GestureGate};

const FRAME: Duration = Duration::from_millis(33);

fn music_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

fn config(dir: &Path) -> AppConfig {
    AppConfig { music_dir: dir.to_path_buf(), ..AppConfig::default() }
}

fn dispatcher() -> GestureDispatcher {
    GestureDispatcher::new(GestureGate::new(Duration::from_secs(1), DebounceMode::Split))
}

/// Play `script` (fingers shown, frames held) through the simulated hand and
/// return the actions that fired.
fn perform(
    script: &[(Option<u8>, usize)],
    jukebox: &mut Jukebox<RecordingDevice>,
) -> Vec<Action> {
    let (tx, rx) = mpsc::channel();
    let mut counter = FingerCounter::new(SimHandLandmarker::new(rx), false);
    let mut dispatcher = dispatcher();
    let mut now = Instant::now();
    let mut fired = Vec::new();

    for &(fingers, frames) in script {
        tx.send(match fingers {
            Some(n) => SimInput::ShowFingers(n),
            None => SimInput::HideHand,
        })
        .unwrap();
        for _ in 0..frames {
            let (_, count) = counter.count(Frame::new(4, 4, 0));
            fired.extend(dispatcher.on_frame(count, now, jukebox));
            now += FRAME;
        }
    }
    fired
}

#[test]
fn skipping_forward_plays_the_next_file() {
    let dir = music_dir(&["a.mp3", "b.mp3", "c.mp3"]);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());

    let fired = perform(&[(Some(1), 5), (Some(5), 5)], &mut jb);
    assert_eq!(fired, vec![Action::NextTrack]);
    assert_eq!(jb.session().loaded(), Some(dir.path().join("b.mp3").as_path()));
    assert!(jb.session().is_playing());
    assert_eq!(jb.status(), "Playing: b.mp3");
}

#[test]
fn fist_toggles_cued_track_then_pauses() {
    let dir = music_dir(&["a.mp3", "b.mp3"]);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());
    assert_eq!(jb.status(), "Ready: a.mp3");

    // The open hand never reaches the gate, so the second fist is a repeat
    // inside the cooldown.
    let fired = perform(&[(Some(0), 3), (Some(5), 3), (Some(0), 3)], &mut jb);
    assert_eq!(fired, vec![Action::TogglePlay]);
    assert!(jb.session().is_playing());

    // Fresh gate: a held fist pauses once and stays paused.
    let fired = perform(&[(Some(0), 90)], &mut jb);
    assert_eq!(fired, vec![Action::TogglePlay]);
    assert!(!jb.session().is_playing());
    assert_eq!(jb.session().device().calls.last(), Some(&DeviceCall::Pause));
}

#[test]
fn hidden_hand_reads_as_fist() {
    let dir = music_dir(&["a.mp3"]);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());
    let fired = perform(&[(None, 2)], &mut jb);
    assert_eq!(fired, vec![Action::TogglePlay]);
}

#[test]
fn empty_camera_toggles_only_once() {
    let dir = music_dir(&["a.mp3"]);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());
    // Five seconds with nobody in view.
    let fired = perform(&[(None, 150)], &mut jb);
    assert_eq!(fired, vec![Action::TogglePlay]);
    assert!(jb.session().is_playing());
}

#[test]
fn paging_through_twelve_tracks() {
    let names: Vec<String> = (0..12).map(|i| format!("{i:02}.mp3")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let dir = music_dir(&refs);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());

    // Held three fingers: fires at 0 ms, ~1.02 s and ~2.05 s.
    let fired = perform(&[(Some(3), 70)], &mut jb);
    assert_eq!(fired, vec![Action::NextPage; 3]);
    assert_eq!(jb.pages().current_page(), 0);
    assert_eq!(page_label(jb.pages(), jb.playlist().len()), "Page 1/3");

    perform(&[(Some(4), 1)], &mut jb);
    let shown: Vec<usize> = page_entries(jb.playlist(), jb.pages()).iter().map(|(i, _)| *i).collect();
    assert_eq!(shown, vec![10, 11]);
    // Paging never moves the playing cursor.
    assert_eq!(jb.playlist().current_index(), Some(0));
}

#[test]
fn empty_directory_ignores_every_gesture() {
    let dir = music_dir(&["cover.jpg"]);
    let mut jb = build_jukebox(&config(dir.path()), RecordingDevice::default());
    let fired = perform(&[(Some(0), 40), (Some(1), 40), (Some(3), 40)], &mut jb);
    assert!(fired.is_empty());
    assert_eq!(jb.status(), NO_TRACKS);
    assert!(jb.session().device().calls.iter().all(|c| !matches!(c, DeviceCall::Load(_))));
}

#[test]
fn rejected_file_keeps_the_loop_going() {
    let dir = music_dir(&["a.mp3", "b.mp3", "c.mp3"]);
    let device = RecordingDevice::rejecting([dir.path().join("b.mp3")]);
    let mut jb = build_jukebox(&config(dir.path()), device);

    perform(&[(Some(1), 1)], &mut jb);
    assert!(jb.status().starts_with("Cannot play b.mp3"));
    assert_eq!(jb.session().loaded(), None);
    assert!(!jb.session().is_playing());

    perform(&[(Some(1), 40)], &mut jb);
    assert_eq!(jb.playlist().current_index(), Some(0));
    assert_eq!(jb.status(), "Playing: a.mp3");
}

#[test]
fn null_device_follows_files_on_disk() {
    let dir = music_dir(&["a.mp3", "b.mp3"]);
    let mut jb = build_jukebox(&config(dir.path()), NullDevice::default());
    let mut d = dispatcher();
    let t0 = Instant::now();

    assert_eq!(d.on_frame(1, t0, &mut jb), Some(Action::NextTrack));
    assert!(jb.session().is_playing());

    fs::remove_file(dir.path().join("a.mp3")).unwrap();
    assert_eq!(d.on_frame(2, t0 + FRAME, &mut jb), Some(Action::PreviousTrack));
    assert!(jb.status().starts_with("Cannot play a.mp3"));
}
