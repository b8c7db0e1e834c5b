//! Cover-art lookup.
//!
//! A track's cover is the image next to it with the same file stem.  When
//! that is missing the configured default cover is used, and when *that* is
//! missing too the renderer draws a blank placeholder.

use std::path::{Path, PathBuf};

use crate::Track;

/// Image extensions tried, in order, when looking for a companion cover.
pub const COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Where the thumbnail for a track should come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtworkSource {
    /// Cover stored next to the audio file.
    Companion(PathBuf),
    /// The configured fallback image.
    Default(PathBuf),
    /// Nothing on disk; draw a blank square.
    Blank,
}

impl ArtworkSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ArtworkSource::Companion(p) | ArtworkSource::Default(p) => Some(p),
            ArtworkSource::Blank => None,
        }
    }

    /// The next tier down, used when this source exists but fails to decode.
    pub fn fallback(&self, default_cover: &Path) -> ArtworkSource {
        match self {
            ArtworkSource::Companion(_) if default_cover.is_file() => {
                ArtworkSource::Default(default_cover.to_path_buf())
            }
            _ => ArtworkSource::Blank,
        }
    }
}

/// Look for `<stem>.jpg` (then `.jpeg`, `.png`) next to `audio`.
pub fn companion_cover(audio: &Path) -> Option<PathBuf> {
    COVER_EXTENSIONS
        .iter()
        .map(|ext| audio.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Resolve the cover for `track`, walking the fallback tiers.
pub fn resolve(track: &Track, default_cover: &Path) -> ArtworkSource {
    if let Some(cover) = track.artwork().filter(|p| p.is_file()) {
        return ArtworkSource::Companion(cover.to_path_buf());
    }
    if default_cover.is_file() {
        return ArtworkSource::Default(default_cover.to_path_buf());
    }
    ArtworkSource::Blank
}
