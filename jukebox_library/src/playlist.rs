//! Cyclic playlist with a current-track cursor.

use std::fs;
use std::path::Path;

use crate::artwork::companion_cover;
use crate::{LibraryError, Track};

// ════════════════════════════════════════════════════════════════════════════
// Directory scan
// ════════════════════════════════════════════════════════════════════════════

/// List the tracks with `extension` (case-insensitive) in `dir`.
///
/// The directory is created when it does not exist.  Tracks are sorted by
/// file name so repeated scans in one run return the same order.
pub fn scan_directory(dir: &Path, extension: &str) -> Result<Vec<Track>, LibraryError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| LibraryError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        tracing::info!(dir = %dir.display(), "Created missing track directory");
    }

    let entries = fs::read_dir(dir).map_err(|source| LibraryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tracks: Vec<Track> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|path| path.is_file() && has_extension(path, extension))
        .map(|path| {
            let track = Track::new(&path);
            match companion_cover(&path) {
                Some(cover) => track.with_artwork(cover),
                None        => track,
            }
        })
        .collect();

    tracks.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(tracks)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

// ════════════════════════════════════════════════════════════════════════════
// Playlist
// ════════════════════════════════════════════════════════════════════════════

/// Ordered, cyclic list of tracks.
///
/// `current` is only meaningful while the list is non-empty; every accessor
/// returns `None` for an empty playlist instead of indexing.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    tracks:  Vec<Track>,
    current: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Playlist { tracks, current: 0 }
    }

    /// Load every `extension` file from `dir`.
    ///
    /// Never fails: an unreadable directory is logged and yields an empty
    /// playlist.
    pub fn load(dir: impl AsRef<Path>, extension: &str) -> Self {
        let dir = dir.as_ref();
        match scan_directory(dir, extension) {
            Ok(tracks) => {
                tracing::info!(dir = %dir.display(), tracks = tracks.len(), "Loaded playlist");
                Playlist::new(tracks)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load playlist; starting empty");
                Playlist::default()
            }
        }
    }

    pub fn len(&self)      -> usize    { self.tracks.len() }
    pub fn is_empty(&self) -> bool     { self.tracks.is_empty() }
    pub fn tracks(&self)   -> &[Track] { &self.tracks }

    pub fn get(&self, index: usize) -> Option<&Track> { self.tracks.get(index) }

    pub fn current_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Advance the cursor, wrapping past the last track.  Returns the new
    /// current track, or `None` (and no change) when empty.
    pub fn next_track(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 { return None; }
        self.current = (self.current + 1) % len;
        self.current()
    }

    /// Retreat the cursor, wrapping before the first track.
    pub fn previous_track(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 { return None; }
        self.current = (self.current + len - 1) % len;
        self.current()
    }

    /// Jump straight to `index`.  Out-of-range indices leave the cursor alone.
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        if index >= self.len() { return None; }
        self.current = index;
        self.current()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
