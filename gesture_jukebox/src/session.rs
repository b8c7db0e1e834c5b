//! Play/pause state and volume, kept in step with the audio device.

use std::path::{Path, PathBuf};

use jukebox_library::Track;

use crate::player::{AudioDevice, AudioError};

/// Owns the audio device for the lifetime of the run.
///
/// The session only changes `is_playing` after the device accepted the
/// command, so a failed load or play leaves the previous state in place.
pub struct PlaybackSession<D: AudioDevice> {
    device:     D,
    is_playing: bool,
    volume:     f32,
    /// Whether the loaded track has been started at least once.
    started:    bool,
    loaded:     Option<PathBuf>,
}

impl<D: AudioDevice> PlaybackSession<D> {
    pub fn new(mut device: D, volume: f32) -> Self {
        let volume = clamp_volume(volume).unwrap_or(1.0);
        device.set_volume(volume);
        PlaybackSession { device, is_playing: false, volume, started: false, loaded: None }
    }

    pub fn is_playing(&self) -> bool           { self.is_playing }
    pub fn volume(&self)     -> f32            { self.volume }
    pub fn loaded(&self)     -> Option<&Path>  { self.loaded.as_deref() }
    pub fn device(&self)     -> &D             { &self.device }

    /// Load `track` at the current volume without starting it.
    pub fn cue(&mut self, track: &Track) -> Result<(), AudioError> {
        self.device.load(track.path())?;
        self.device.set_volume(self.volume);
        self.loaded  = Some(track.path().to_path_buf());
        self.started = false;
        tracing::debug!(track = track.name(), "Track cued");
        Ok(())
    }

    /// Load `track` and start it from the beginning.
    pub fn load_and_play(&mut self, track: &Track) -> Result<(), AudioError> {
        self.cue(track)?;
        self.play()
    }

    /// Start the loaded track from the beginning.
    pub fn play(&mut self) -> Result<(), AudioError> {
        if self.loaded.is_none() {
            return Err(AudioError::NothingLoaded);
        }
        self.device.play()?;
        self.is_playing = true;
        self.started    = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.device.pause();
        self.is_playing = false;
    }

    /// Continue where playback paused.  A cued track that never started is
    /// played from the top instead.
    pub fn resume(&mut self) -> Result<(), AudioError> {
        if !self.started {
            return self.play();
        }
        self.device.unpause();
        self.is_playing = true;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<(), AudioError> {
        if self.is_playing {
            self.pause();
            Ok(())
        } else {
            self.resume()
        }
    }

    /// Silence output and forget the loaded track.  The next `toggle` has
    /// nothing to resume until a track is loaded again.
    pub fn stop(&mut self) {
        self.device.pause();
        self.is_playing = false;
        self.started    = false;
        self.loaded     = None;
    }

    /// Clamp to 0.0–1.0; NaN is ignored.  Returns the volume now in effect.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if let Some(v) = clamp_volume(volume) {
            self.volume = v;
            self.device.set_volume(v);
        }
        self.volume
    }
}

fn clamp_volume(v: f32) -> Option<f32> {
    (!v.is_nan()).then(|| v.clamp(0.0, 1.0))
}
