//! # jukebox_library
//!
//! The music side of the gesture jukebox, free of any audio or video code:
//!
//! * [`Track`]: one audio file plus its optional companion artwork.
//! * [`Playlist`]: ordered, cyclic list of tracks with a current-track cursor.
//! * [`PageView`]: fixed-size, cyclic pages over a playlist for display.
//! * [`artwork`]: tiered cover lookup (companion → default → blank).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use jukebox_library::{PageView, Playlist};
//!
//! let mut playlist = Playlist::load("music", "mp3");
//! let mut pages    = PageView::new(5);
//!
//! if let Some(track) = playlist.next_track() {
//!     println!("now playing {}", track.name());
//! }
//! pages.next_page(&playlist);
//! for track in pages.visible_slice(&playlist) {
//!     println!("  {}", track.name());
//! }
//! ```

use std::path::PathBuf;

pub mod artwork;
pub mod pages;
pub mod playlist;
mod track;

pub use artwork::ArtworkSource;
pub use pages::PageView;
pub use playlist::Playlist;
pub use track::Track;

/// Errors raised while reading a track directory.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("failed to create track directory {}: {source}", path.display())]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read track directory {}: {source}", path.display())]
    ReadDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}
