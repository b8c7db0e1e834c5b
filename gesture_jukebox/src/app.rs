//! Top-level control loop.
//!
//! `run()` owns the window, the camera, the hand landmarker and the
//! [`Jukebox`] for the lifetime of the session.  Each iteration is one
//! frame: poll input → read frame → count fingers → dispatch → render.

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use hand_gesture::{FingerCounter, GestureGate, HandLandmarker};
use jukebox_library::{PageView, Playlist, Track};

use crate::artwork::ArtworkCache;
use crate::camera::{FrameSource, SimCamera};
use crate::config::AppConfig;
use crate::dispatcher::GestureDispatcher;
use crate::error::AppError;
use crate::gesture::{SimHandLandmarker, SimInput};
use crate::jukebox::Jukebox;
use crate::player::{open_audio_device, AudioDevice};
use crate::session::PlaybackSession;
use crate::visualizer::{Scene, Visualizer, THUMB_SIZE};

// ════════════════════════════════════════════════════════════════════════════
// Scene helpers
// ════════════════════════════════════════════════════════════════════════════

/// Tracks on the current page, paired with their playlist index.
pub fn page_entries<'a>(playlist: &'a Playlist, pages: &PageView) -> Vec<(usize, &'a Track)> {
    let range = pages.visible_range(playlist.len());
    let start = range.start;
    pages
        .visible_slice(playlist)
        .iter()
        .enumerate()
        .map(|(i, track)| (start + i, track))
        .collect()
}

pub fn page_label(pages: &PageView, len: usize) -> String {
    format!("Page {}/{}", pages.current_page() + 1, pages.total_pages(len))
}

/// Build a jukebox over the configured music directory, cueing the first
/// track.
pub fn build_jukebox<D: AudioDevice>(cfg: &AppConfig, device: D) -> Jukebox<D> {
    let playlist = Playlist::load(&cfg.music_dir, &cfg.extension);
    tracing::info!(
        dir = %cfg.music_dir.display(),
        tracks = playlist.len(),
        "Playlist loaded",
    );
    Jukebox::new(
        playlist,
        PageView::new(cfg.page_size),
        PlaybackSession::new(device, cfg.volume),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Hand landmark source
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "leap")]
fn open_landmarker(rx: Receiver<SimInput>) -> Box<dyn HandLandmarker> {
    match crate::gesture::LeapLandmarker::open() {
        Ok(leap) => Box::new(leap),
        Err(e) => {
            tracing::warn!(error = %e, "LeapMotion unavailable, falling back to keyboard simulation");
            Box::new(SimHandLandmarker::new(rx))
        }
    }
}

#[cfg(not(feature = "leap"))]
fn open_landmarker(rx: Receiver<SimInput>) -> Box<dyn HandLandmarker> {
    Box::new(SimHandLandmarker::new(rx))
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open every resource, then drive the frame loop until the window closes
/// or `Q`/`Escape` is pressed.  A failed frame read ends the loop with an
/// error; everything opened here is released on the way out.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    let mut viz = Visualizer::new(&cfg, sim_tx).map_err(AppError::Window)?;
    let mut camera = SimCamera::open(cfg.camera_index, cfg.window_width, cfg.window_height)?;
    let mut counter = FingerCounter::new(open_landmarker(sim_rx), cfg.annotate);

    let mut jukebox = build_jukebox(&cfg, open_audio_device(cfg.mute));
    let mut dispatcher = GestureDispatcher::new(GestureGate::new(cfg.gesture_cooldown, cfg.debounce));
    let mut artwork = ArtworkCache::new(&cfg.default_cover, THUMB_SIZE);

    tracing::info!(
        fps = cfg.fps,
        cooldown_ms = cfg.gesture_cooldown.as_millis() as u64,
        debounce = ?cfg.debounce,
        "Control loop started",
    );

    while viz.is_open() {
        if !viz.poll_input() {
            tracing::info!("Quit requested");
            break;
        }

        let nudge = viz.volume_nudge();
        if nudge != 0.0 {
            let volume = jukebox.session().volume() + nudge;
            jukebox.set_volume(volume);
        }

        let frame = match camera.read() {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, "Camera frame read failed");
                return Err(e.into());
            }
        };

        let (annotated, fingers) = counter.count(frame);
        if let Some(action) = dispatcher.on_frame(fingers, Instant::now(), &mut jukebox) {
            tracing::debug!(?action, status = jukebox.status(), "Action applied");
        }

        let thumbnail = match jukebox.playlist().current() {
            Some(track) => Some(artwork.thumbnail_for(track)),
            None        => None,
        };
        let scene = Scene {
            frame:      &annotated,
            page:       page_entries(jukebox.playlist(), jukebox.pages()),
            current:    jukebox.playlist().current_index(),
            page_label: page_label(jukebox.pages(), jukebox.playlist().len()),
            thumbnail,
            status:     jukebox.status(),
            playing:    jukebox.session().is_playing(),
            volume:     jukebox.session().volume(),
        };
        viz.render(&scene);
    }

    tracing::info!("Control loop stopped");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RecordingDevice;
    use std::fs;

    fn playlist(n: usize) -> Playlist {
        Playlist::new((0..n).map(|i| Track::new(format!("{i:02}.mp3"))).collect())
    }

    #[test]
    fn entries_carry_playlist_indices() {
        let pl = playlist(12);
        let mut pages = PageView::new(5);
        pages.next_page(&pl);
        let idx: Vec<usize> = page_entries(&pl, &pages).iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![5, 6, 7, 8, 9]);

        pages.next_page(&pl);
        let names: Vec<&str> = page_entries(&pl, &pages).iter().map(|(_, t)| t.name()).collect();
        assert_eq!(names, vec!["10.mp3", "11.mp3"]);
    }

    #[test]
    fn label_is_one_based() {
        let pl = playlist(12);
        let mut pages = PageView::new(5);
        assert_eq!(page_label(&pages, pl.len()), "Page 1/3");
        pages.previous_page(&pl);
        assert_eq!(page_label(&pages, pl.len()), "Page 3/3");
    }

    #[test]
    fn empty_playlist_has_one_empty_page() {
        let pl = Playlist::default();
        let pages = PageView::new(5);
        assert!(page_entries(&pl, &pages).is_empty());
        assert_eq!(page_label(&pages, 0), "Page 1/1");
    }

    #[test]
    fn build_jukebox_cues_first_track() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp3", "a.mp3", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let cfg = AppConfig { music_dir: dir.path().to_path_buf(), ..AppConfig::default() };
        let jb = build_jukebox(&cfg, RecordingDevice::default());

        assert_eq!(jb.playlist().len(), 2);
        assert_eq!(jb.playlist().current_index(), Some(0));
        assert_eq!(jb.session().loaded(), Some(dir.path().join("a.mp3").as_path()));
        assert!(!jb.session().is_playing());
    }
}
