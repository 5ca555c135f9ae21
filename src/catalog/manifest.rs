use std::fs;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use serde::Deserialize;

use super::model::{Catalog, GenreEntry, Track};

/// The manifest that ships inside the binary. It mirrors the stock track
/// sets; a user manifest (config `catalog.manifest_path`) replaces it.
const EMBEDDED_MANIFEST: &str = include_str!("../../assets/catalog.toml");

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "genre")]
    genres: Vec<ManifestGenre>,
}

#[derive(Debug, Deserialize)]
struct ManifestGenre {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "track")]
    tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Deserialize)]
struct ManifestTrack {
    id: u32,
    title: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    license: Option<String>,
    audio: PathBuf,
    #[serde(default)]
    thumb: Option<PathBuf>,
}

/// Parse a manifest from TOML text. Relative `audio`/`thumb` paths are
/// resolved against `assets_root`.
pub fn parse_manifest(text: &str, assets_root: &Path) -> Result<Catalog, toml::de::Error> {
    let file: ManifestFile = toml::from_str(text)?;

    let genres = file
        .genres
        .into_iter()
        .map(|g| {
            let label = g.label.unwrap_or_else(|| g.id.clone());
            let tracks = g
                .tracks
                .into_iter()
                .map(|t| {
                    let audio = resolve(assets_root, t.audio);
                    let duration = probe_duration(&audio);
                    Track {
                        id: t.id,
                        title: t.title,
                        artist: t.artist,
                        album: t.album,
                        license: t.license,
                        audio,
                        thumb: t.thumb.map(|p| resolve(assets_root, p)),
                        duration,
                    }
                })
                .collect();
            GenreEntry {
                id: g.id,
                label,
                tracks,
            }
        })
        .collect();

    Ok(Catalog::new(genres))
}

/// Load a manifest file from disk.
pub fn load_manifest(
    path: &Path,
    assets_root: &Path,
) -> Result<Catalog, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let catalog = parse_manifest(&text, assets_root)?;
    Ok(catalog)
}

/// The built-in catalog. The embedded manifest is a compile-time asset, so
/// a parse failure here is a packaging bug.
pub fn embedded_catalog(assets_root: &Path) -> Catalog {
    parse_manifest(EMBEDDED_MANIFEST, assets_root)
        .expect("embedded catalog manifest must parse")
}

fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { root.join(p) }
}

// Tag duration is best-effort: manifests routinely reference files that are
// not present yet, and missing files simply leave duration unknown.
fn probe_duration(path: &Path) -> Option<std::time::Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
