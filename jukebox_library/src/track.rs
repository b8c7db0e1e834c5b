use std::path::{Path, PathBuf};

/// A single audio file in the playlist.
///
/// Tracks are immutable once discovered; the path doubles as the stable key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    path:    PathBuf,
    name:    String,
    artwork: Option<PathBuf>,
}

impl Track {
    /// A track with no companion artwork. The display name is the file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Track { path, name, artwork: None }
    }

    pub fn with_artwork(mut self, artwork: impl Into<PathBuf>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn name(&self) -> &str  { &self.name }

    /// Companion cover image found next to the audio file, if any.
    pub fn artwork(&self) -> Option<&Path> { self.artwork.as_deref() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_file_name() {
        let t = Track::new("/music/Blue in Green.mp3");
        assert_eq!(t.name(), "Blue in Green.mp3");
        assert_eq!(t.path(), Path::new("/music/Blue in Green.mp3"));
        assert!(t.artwork().is_none());
    }

    #[test]
    fn with_artwork_sets_cover() {
        let t = Track::new("a.mp3").with_artwork("a.jpg");
        assert_eq!(t.artwork(), Some(Path::new("a.jpg")));
    }
}
