//! Decoded, scaled cover thumbnails.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use jukebox_library::{artwork, ArtworkSource, Track};

const BLANK: u32 = 0xFF000000;

/// Square ARGB thumbnail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub size:   usize,
    pub pixels: Vec<u32>,
    pub source: ArtworkSource,
}

impl Thumbnail {
    fn blank(size: usize) -> Self {
        Thumbnail { size, pixels: vec![BLANK; size * size], source: ArtworkSource::Blank }
    }
}

/// Keeps the thumbnail of the last track asked for, so a cover is decoded
/// once per track change rather than once per frame.
pub struct ArtworkCache {
    default_cover: PathBuf,
    size:          usize,
    key:           Option<PathBuf>,
    thumb:         Thumbnail,
}

impl ArtworkCache {
    pub fn new(default_cover: impl Into<PathBuf>, size: usize) -> Self {
        ArtworkCache {
            default_cover: default_cover.into(),
            size,
            key: None,
            thumb: Thumbnail::blank(size),
        }
    }

    pub fn thumbnail_for(&mut self, track: &Track) -> &Thumbnail {
        if self.key.as_deref() != Some(track.path()) {
            self.thumb = self.load(track);
            self.key = Some(track.path().to_path_buf());
        }
        &self.thumb
    }

    /// Companion cover, then default cover, then blank.  A file that exists
    /// but fails to decode drops to the next tier.
    fn load(&self, track: &Track) -> Thumbnail {
        let mut source = artwork::resolve(track, &self.default_cover);
        while let Some(path) = source.path() {
            match decode(path, self.size) {
                Ok(pixels) => return Thumbnail { size: self.size, pixels, source },
                Err(e) => {
                    tracing::warn!(cover = %path.display(), error = %e, "Cover image unreadable");
                    source = source.fallback(&self.default_cover);
                }
            }
        }
        Thumbnail::blank(self.size)
    }
}

fn decode(path: &Path, size: usize) -> Result<Vec<u32>, image::ImageError> {
    let side = size as u32;
    let rgb = image::open(path)?
        .resize_exact(side, side, FilterType::Triangle)
        .to_rgb8();
    Ok(rgb
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            0xFF000000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
        })
        .collect())
}
