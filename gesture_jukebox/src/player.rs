//! Audio output devices.
//!
//! [`PlaybackSession`](crate::session::PlaybackSession) talks to the sound
//! card only through [`AudioDevice`].  Every call is synchronous and returns
//! as soon as the backend has accepted it; decoding and mixing run on the
//! backend's own thread.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, Sink};

// ════════════════════════════════════════════════════════════════════════════
// AudioError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output available: {0}")]
    Output(String),
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("no track loaded")]
    NothingLoaded,
}

// ════════════════════════════════════════════════════════════════════════════
// AudioDevice: abstraction over rodio / null / recording
// ════════════════════════════════════════════════════════════════════════════

pub trait AudioDevice {
    /// Prepare `path` for playback.  Does not start it.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    /// Start the loaded track from the beginning.
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn unpause(&mut self);
    /// `volume` is already clamped to 0.0–1.0 by the caller.
    fn set_volume(&mut self, volume: f32);
}

impl<D: AudioDevice + ?Sized> AudioDevice for Box<D> {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> { (**self).load(path) }
    fn play(&mut self) -> Result<(), AudioError>               { (**self).play() }
    fn pause(&mut self)                                        { (**self).pause() }
    fn unpause(&mut self)                                      { (**self).unpause() }
    fn set_volume(&mut self, volume: f32)                      { (**self).set_volume(volume) }
}

// ── rodio backend ─────────────────────────────────────────────────────────

pub struct RodioDevice {
    sink:    Sink,
    pending: Option<Decoder<BufReader<File>>>,
    // Dropping the stream stops all output, so it lives as long as the sink.
    _stream: OutputStream,
}

impl RodioDevice {
    pub fn open() -> Result<Self, AudioError> {
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::Output(e.to_string()))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| AudioError::Output(e.to_string()))?;
        sink.pause();
        tracing::info!("Audio output opened");
        Ok(RodioDevice { sink, pending: None, _stream })
    }
}

impl AudioDevice for RodioDevice {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path:   path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.pending = Some(decoder);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let source = self.pending.take().ok_or(AudioError::NothingLoaded)?;
        self.sink.clear();
        self.sink.append(source);
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self)   { self.sink.pause(); }
    fn unpause(&mut self) { self.sink.play(); }

    fn set_volume(&mut self, volume: f32) { self.sink.set_volume(volume); }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        self.sink.stop();
        tracing::info!("Audio output released");
    }
}

// ── null backend (used when no output device is available) ────────────────

/// Accepts every command and plays nothing.  Still refuses files that do not
/// exist so missing tracks surface the same way as with real output.
#[derive(Debug, Default)]
pub struct NullDevice {
    loaded: bool,
}

impl AudioDevice for NullDevice {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        std::fs::metadata(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.loaded = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if self.loaded { Ok(()) } else { Err(AudioError::NothingLoaded) }
    }

    fn pause(&mut self)              {}
    fn unpause(&mut self)            {}
    fn set_volume(&mut self, _v: f32) {}
}

// ── recording backend ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall {
    Load(PathBuf),
    Play,
    Pause,
    Unpause,
    SetVolume(f32),
}

/// Remembers every call instead of making sound.  Paths listed in
/// `reject` fail to load, as if the file were missing.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls:  Vec<DeviceCall>,
    pub reject: Vec<PathBuf>,
    loaded:     Option<PathBuf>,
}

impl RecordingDevice {
    pub fn rejecting(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        RecordingDevice { reject: paths.into_iter().collect(), ..Default::default() }
    }

    pub fn loaded(&self) -> Option<&Path> { self.loaded.as_deref() }
}

impl AudioDevice for RecordingDevice {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        self.calls.push(DeviceCall::Load(path.to_path_buf()));
        if self.reject.iter().any(|p| p == path) {
            return Err(AudioError::Open {
                path:   path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.calls.push(DeviceCall::Play);
        self.loaded.as_ref().map(|_| ()).ok_or(AudioError::NothingLoaded)
    }

    fn pause(&mut self)   { self.calls.push(DeviceCall::Pause); }
    fn unpause(&mut self) { self.calls.push(DeviceCall::Unpause); }

    fn set_volume(&mut self, volume: f32) { self.calls.push(DeviceCall::SetVolume(volume)); }
}

// ════════════════════════════════════════════════════════════════════════════
// open_audio_device: real output if possible, silence otherwise
// ════════════════════════════════════════════════════════════════════════════

/// Try to open the default output device.
/// Falls back to [`NullDevice`] with a warning if none is found.
pub fn open_audio_device(mute: bool) -> Box<dyn AudioDevice> {
    if mute {
        tracing::info!("Audio muted; using null output");
        return Box::new(NullDevice::default());
    }
    match RodioDevice::open() {
        Ok(device) => Box::new(device),
        Err(e) => {
            tracing::warn!(error = %e, "Could not open audio output; using null output");
            Box::new(NullDevice::default())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_device_rejects_missing_file() {
        let mut dev = NullDevice::default();
        let err = dev.load(Path::new("/definitely/not/here.mp3")).unwrap_err();
        assert!(matches!(err, AudioError::Open { .. }));
        assert!(matches!(dev.play(), Err(AudioError::NothingLoaded)));
    }

    #[test]
    fn null_device_accepts_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut dev = NullDevice::default();
        dev.load(file.path()).unwrap();
        assert!(dev.play().is_ok());
    }

    #[test]
    fn recording_device_logs_calls_in_order() {
        let mut dev = RecordingDevice::default();
        dev.load(Path::new("a.mp3")).unwrap();
        dev.set_volume(0.5);
        dev.play().unwrap();
        dev.pause();
        dev.unpause();
        assert_eq!(dev.calls, vec![
            DeviceCall::Load(PathBuf::from("a.mp3")),
            DeviceCall::SetVolume(0.5),
            DeviceCall::Play,
            DeviceCall::Pause,
            DeviceCall::Unpause,
        ]);
    }

    #[test]
    fn recording_device_rejects_listed_paths() {
        let mut dev = RecordingDevice::rejecting([PathBuf::from("gone.mp3")]);
        assert!(dev.load(Path::new("gone.mp3")).is_err());
        assert!(dev.loaded().is_none());
    }

    #[test]
    fn error_messages_name_the_file() {
        let err = AudioError::Decode { path: PathBuf::from("x.mp3"), reason: "bad header".into() };
        assert_eq!(err.to_string(), "cannot decode x.mp3: bad header");
    }
}
