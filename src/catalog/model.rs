use std::path::PathBuf;
use std::time::Duration;

/// One playable catalog entry.
///
/// `duration` comes from tag metadata and is display-only; the playback
/// duration truth arrives from the transport once the source is loaded.
#[derive(Clone, Debug)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub license: Option<String>,
    pub audio: PathBuf,
    pub thumb: Option<PathBuf>,
    pub duration: Option<Duration>,
}

impl Track {
    /// Build the "Artist - Title" display string, falling back to the title.
    pub fn display(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.title),
            _ => self.title.clone(),
        }
    }
}

/// A genre and its ordered track list.
#[derive(Clone, Debug)]
pub struct GenreEntry {
    pub id: String,
    pub label: String,
    pub tracks: Vec<Track>,
}

/// Ordered collection of genres. Genre order is deterministic: manifest
/// order, or sorted directory names for scanned catalogs.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    genres: Vec<GenreEntry>,
}

impl Catalog {
    pub fn new(genres: Vec<GenreEntry>) -> Self {
        Self { genres }
    }

    pub fn genres(&self) -> &[GenreEntry] {
        &self.genres
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Tracks for `genre`. Unknown genres yield an empty playlist; callers
    /// degrade to a "no track loaded" state rather than failing.
    pub fn playlist(&self, genre: &str) -> &[Track] {
        self.genres
            .iter()
            .find(|g| g.id == genre)
            .map(|g| g.tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Human label for `genre`, if the genre exists.
    pub fn label(&self, genre: &str) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == genre)
            .map(|g| g.label.as_str())
    }

    /// Position of `genre` in the display order.
    pub fn genre_position(&self, genre: &str) -> Option<usize> {
        self.genres.iter().position(|g| g.id == genre)
    }

    /// First genre in display order, used when the configured default is
    /// missing from the catalog.
    pub fn first_genre(&self) -> Option<&str> {
        self.genres.first().map(|g| g.id.as_str())
    }
}
