use crate::catalog::{Catalog, Track};

/// The main application model: catalog plus current selection.
pub struct App {
    pub catalog: Catalog,
    pub genre: String,
    pub track_index: usize,
    /// Set whenever the selection changed and the swap sequence has not
    /// been started for it yet; consumed by the runtime loop.
    pub track_dirty: bool,
}

impl App {
    /// Create the shell, preferring `default_genre` and falling back to the
    /// catalog's first genre when the default is unknown.
    pub fn new(catalog: Catalog, default_genre: &str) -> Self {
        let genre = if catalog.genre_position(default_genre).is_some() {
            default_genre.to_string()
        } else {
            catalog
                .first_genre()
                .unwrap_or(default_genre)
                .to_string()
        };

        Self {
            catalog,
            genre,
            track_index: 0,
            track_dirty: true,
        }
    }

    pub fn playlist(&self) -> &[Track] {
        self.catalog.playlist(&self.genre)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist().get(self.track_index)
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist().is_empty()
    }

    pub fn clear_track_dirty(&mut self) {
        self.track_dirty = false;
    }

    /// Advance to the next track, wrapping past the last back to 0.
    pub fn next_track(&mut self) {
        let len = self.playlist().len();
        if len == 0 {
            return;
        }
        self.track_index = (self.track_index + 1) % len;
        self.track_dirty = true;
    }

    /// Step back to the previous track, wrapping from 0 to the last.
    pub fn prev_track(&mut self) {
        let len = self.playlist().len();
        if len == 0 {
            return;
        }
        self.track_index = if self.track_index == 0 {
            len - 1
        } else {
            self.track_index - 1
        };
        self.track_dirty = true;
    }

    /// Jump to a specific track. Returns whether the selection changed;
    /// out-of-range and same-track requests are ignored.
    pub fn select_track(&mut self, index: usize) -> bool {
        if index >= self.playlist().len() || index == self.track_index {
            return false;
        }
        self.track_index = index;
        self.track_dirty = true;
        true
    }

    /// Switch genre; selection resets to the first track. Unknown and
    /// already-current genres are ignored.
    pub fn select_genre(&mut self, genre: &str) -> bool {
        if genre == self.genre || self.catalog.genre_position(genre).is_none() {
            return false;
        }
        self.genre = genre.to_string();
        self.track_index = 0;
        self.track_dirty = true;
        true
    }

    /// Switch genre by display-order position.
    pub fn select_genre_at(&mut self, position: usize) -> bool {
        let Some(id) = self.catalog.genres().get(position).map(|g| g.id.clone()) else {
            return false;
        };
        self.select_genre(&id)
    }

    /// Cycle to the next genre in display order, wrapping.
    pub fn cycle_genre(&mut self) -> bool {
        let count = self.catalog.genres().len();
        if count < 2 {
            return false;
        }
        let position = self.catalog.genre_position(&self.genre).unwrap_or(0);
        self.select_genre_at((position + 1) % count)
    }

    /// Cycle to the previous genre in display order, wrapping.
    pub fn cycle_genre_back(&mut self) -> bool {
        let count = self.catalog.genres().len();
        if count < 2 {
            return false;
        }
        let position = self.catalog.genre_position(&self.genre).unwrap_or(0);
        self.select_genre_at((position + count - 1) % count)
    }
}
