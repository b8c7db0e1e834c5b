//! Paginated view over a [`Playlist`].
//!
//! Pages only affect what is drawn; playback order is untouched.  The page
//! count is recomputed from the playlist on every call, so a cursor left
//! out of range by a shrinking list heals itself on the next move.

use std::ops::Range;

use crate::{Playlist, Track};

#[derive(Clone, Debug)]
pub struct PageView {
    page_size:    usize,
    current_page: usize,
}

impl PageView {
    /// `page_size` of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        PageView { page_size: page_size.max(1), current_page: 0 }
    }

    pub fn page_size(&self)    -> usize { self.page_size }
    pub fn current_page(&self) -> usize { self.current_page }

    /// `max(1, ceil(len / page_size))`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    pub fn next_page(&mut self, playlist: &Playlist) -> usize {
        let total = self.total_pages(playlist.len());
        let page  = self.current_page.min(total - 1);
        self.current_page = (page + 1) % total;
        self.current_page
    }

    pub fn previous_page(&mut self, playlist: &Playlist) -> usize {
        let total = self.total_pages(playlist.len());
        let page  = self.current_page.min(total - 1);
        self.current_page = (page + total - 1) % total;
        self.current_page
    }

    /// Absolute track indices shown on the current page.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let page  = self.current_page.min(self.total_pages(len) - 1);
        let start = (page * self.page_size).min(len);
        let end   = (start + self.page_size).min(len);
        start..end
    }

    pub fn visible_slice<'a>(&self, playlist: &'a Playlist) -> &'a [Track] {
        &playlist.tracks()[self.visible_range(playlist.len())]
    }
}
