use std::path::{Path, PathBuf};

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use super::model::{Catalog, GenreEntry, Track};

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "wav" | "ogg"
            )
        })
        .unwrap_or(false)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png")
        })
        .unwrap_or(false)
}

// "lofi" -> "Lofi". Manifest catalogs carry real labels; scanned ones get
// a capitalized directory name.
fn genre_label(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Thumbnail for an audio file: prefer a sidecar image with the same stem,
/// otherwise the first image (by name) in the same directory.
fn thumb_for(audio: &Path, images: &[PathBuf]) -> Option<PathBuf> {
    let stem = audio.file_stem()?;
    images
        .iter()
        .find(|img| img.file_stem() == Some(stem))
        .or_else(|| images.first())
        .cloned()
}

fn read_track(index: usize, path: &Path, images: &[PathBuf]) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut license: Option<String> = None;
    let mut duration = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(ItemKey::CopyrightMessage) {
                let v = v.trim();
                if !v.is_empty() {
                    license = Some(v.to_string());
                }
            }
        }
    }

    Track {
        id: (index + 1) as u32,
        title,
        artist,
        album,
        license,
        audio: path.to_path_buf(),
        thumb: thumb_for(path, images),
        duration,
    }
}

/// Build a catalog from an assets directory: each immediate subdirectory of
/// `root` is a genre, and the audio files inside it (recursively) become its
/// playlist, ordered by file name.
pub fn scan_assets(root: &Path) -> Catalog {
    let mut genre_dirs: Vec<PathBuf> = std::fs::read_dir(root)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    genre_dirs.sort();

    let mut genres: Vec<GenreEntry> = Vec::new();
    for dir in genre_dirs {
        let Some(id) = dir.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let mut audio_files: Vec<PathBuf> = Vec::new();
        let mut images: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if is_audio_file(path) {
                audio_files.push(path.to_path_buf());
            } else if is_image_file(path) {
                images.push(path.to_path_buf());
            }
        }
        audio_files.sort();
        images.sort();

        if audio_files.is_empty() {
            continue;
        }

        let tracks = audio_files
            .iter()
            .enumerate()
            .map(|(i, p)| read_track(i, p, &images))
            .collect();

        genres.push(GenreEntry {
            label: genre_label(&id),
            id,
            tracks,
        });
    }

    Catalog::new(genres)
}
