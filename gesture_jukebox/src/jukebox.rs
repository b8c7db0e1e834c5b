//! The playlist, its page view and the playback session, driven as one unit.
//!
//! Every change of the current track goes through [`PlaybackSession::load_and_play`]:
//! picking a track always starts it.  Device errors never escape; they are
//! logged, shown in the status line, and the previous playing state stays.

use hand_gesture::Action;
use jukebox_library::{PageView, Playlist, Track};

use crate::player::AudioDevice;
use crate::session::PlaybackSession;

pub const NO_TRACKS: &str = "No tracks available";

pub struct Jukebox<D: AudioDevice> {
    playlist: Playlist,
    pages:    PageView,
    session:  PlaybackSession<D>,
    status:   String,
}

impl<D: AudioDevice> Jukebox<D> {
    /// Cues the first track (loaded, not playing) when there is one.
    pub fn new(playlist: Playlist, pages: PageView, session: PlaybackSession<D>) -> Self {
        let mut jukebox = Jukebox { playlist, pages, session, status: String::new() };
        match jukebox.playlist.current() {
            None => jukebox.status = NO_TRACKS.to_string(),
            Some(track) => match jukebox.session.cue(track) {
                Ok(()) => jukebox.status = format!("Ready: {}", track.name()),
                Err(e) => {
                    tracing::warn!(track = track.name(), error = %e, "Could not cue first track");
                    jukebox.status = format!("Cannot load {}: {e}", track.name());
                }
            },
        }
        jukebox
    }

    pub fn playlist(&self) -> &Playlist              { &self.playlist }
    pub fn pages(&self)    -> &PageView              { &self.pages }
    pub fn session(&self)  -> &PlaybackSession<D>    { &self.session }
    pub fn status(&self)   -> &str                   { &self.status }
    pub fn is_empty(&self) -> bool                   { self.playlist.is_empty() }

    pub fn toggle_playback(&mut self) {
        let Some(track) = self.playlist.current() else {
            self.status = NO_TRACKS.to_string();
            return;
        };
        if self.session.loaded() != Some(track.path()) {
            // The cursor moved to a track that never loaded; try it again.
            play_selected(&mut self.session, track, &mut self.status);
            return;
        }
        match self.session.toggle() {
            Ok(()) => {
                let verb = if self.session.is_playing() { "Playing" } else { "Paused" };
                tracing::info!(track = track.name(), playing = self.session.is_playing(), "Playback toggled");
                self.status = format!("{verb}: {}", track.name());
            }
            Err(e) => {
                tracing::warn!(track = track.name(), error = %e, "Toggle playback failed");
                self.status = format!("Cannot play {}: {e}", track.name());
            }
        }
    }

    pub fn next_track(&mut self) {
        match self.playlist.next_track() {
            Some(track) => play_selected(&mut self.session, track, &mut self.status),
            None        => self.status = NO_TRACKS.to_string(),
        }
    }

    pub fn previous_track(&mut self) {
        match self.playlist.previous_track() {
            Some(track) => play_selected(&mut self.session, track, &mut self.status),
            None        => self.status = NO_TRACKS.to_string(),
        }
    }

    /// Jump to `index` and play it.  Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) {
        if let Some(track) = self.playlist.select(index) {
            play_selected(&mut self.session, track, &mut self.status);
        }
    }

    pub fn next_page(&mut self) {
        let page = self.pages.next_page(&self.playlist);
        self.report_page(page);
    }

    pub fn previous_page(&mut self) {
        let page = self.pages.previous_page(&self.playlist);
        self.report_page(page);
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let v = self.session.set_volume(volume);
        self.status = format!("Volume {:.0}%", v * 100.0);
        v
    }

    fn report_page(&mut self, page: usize) {
        let total = self.pages.total_pages(self.playlist.len());
        tracing::debug!(page, total, "Track list paged");
        self.status = format!("Page {}/{}", page + 1, total);
    }
}

fn play_selected<D: AudioDevice>(session: &mut PlaybackSession<D>, track: &Track, status: &mut String) {
    match session.load_and_play(track) {
        Ok(()) => {
            tracing::info!(track = track.name(), "Now playing");
            *status = format!("Playing: {}", track.name());
        }
        Err(e) => {
            tracing::warn!(track = track.name(), error = %e, "Could not play selected track");
            // Never keep the previous track sounding under the new cursor.
            session.stop();
            *status = format!("Cannot play {}: {e}", track.name());
        }
    }
}

/// Apply one classified gesture to the jukebox.
///
/// Returns `false` when the action had nothing to act on (no binding, or an
/// empty playlist).
pub fn dispatch<D: AudioDevice>(action: Action, jukebox: &mut Jukebox<D>) -> bool {
    if action.is_none() {
        return false;
    }
    if jukebox.is_empty() {
        jukebox.status = NO_TRACKS.to_string();
        return false;
    }
    match action {
        Action::TogglePlay    => jukebox.toggle_playback(),
        Action::NextTrack     => jukebox.next_track(),
        Action::PreviousTrack => jukebox.previous_track(),
        Action::NextPage      => jukebox.next_page(),
        Action::PreviousPage  => jukebox.previous_page(),
        Action::None          => return false,
    }
    true
}
