use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;

const MANIFEST: &str = r#"
[[genre]]
id = "lofi"
label = "Lo-Fi"

[[genre.track]]
id = 1
title = "Last Summer"
artist = "HoliznaPATREON"
album = "Lo-Fi"
license = "Attribution 4.0 International License."
audio = "lofi/lofi-01.mp3"
thumb = "lofi/lofi-thumb-1.jpg"

[[genre.track]]
id = 2
title = "3 AM"
artist = "HoliznaPATREON"
audio = "lofi/lofi-02.mp3"

[[genre]]
id = "blues"

[[genre.track]]
id = 1
title = "The Message"
audio = "/abs/blues-01.mp3"
"#;

#[test]
fn parse_manifest_resolves_relative_paths_and_keeps_order() {
    let catalog = parse_manifest(MANIFEST, Path::new("/assets")).unwrap();

    let ids: Vec<&str> = catalog.genres().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["lofi", "blues"]);
    assert_eq!(catalog.label("lofi"), Some("Lo-Fi"));
    // Missing label falls back to the genre id.
    assert_eq!(catalog.label("blues"), Some("blues"));

    let lofi = catalog.playlist("lofi");
    assert_eq!(lofi.len(), 2);
    assert_eq!(lofi[0].title, "Last Summer");
    assert_eq!(
        lofi[0].audio,
        Path::new("/assets/lofi/lofi-01.mp3").to_path_buf()
    );
    assert_eq!(
        lofi[0].thumb.as_deref(),
        Some(Path::new("/assets/lofi/lofi-thumb-1.jpg"))
    );
    assert!(lofi[1].thumb.is_none());
    assert!(lofi[1].album.is_none());

    // Absolute paths pass through untouched.
    let blues = catalog.playlist("blues");
    assert_eq!(blues[0].audio, Path::new("/abs/blues-01.mp3").to_path_buf());
}

#[test]
fn unknown_genre_yields_empty_playlist() {
    let catalog = parse_manifest(MANIFEST, Path::new("/assets")).unwrap();
    assert!(catalog.playlist("vaporwave").is_empty());
    assert_eq!(catalog.label("vaporwave"), None);
    assert_eq!(catalog.genre_position("vaporwave"), None);
}

#[test]
fn embedded_catalog_has_the_stock_genres() {
    let catalog = embedded_catalog(Path::new("assets"));
    let ids: Vec<&str> = catalog.genres().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["lofi", "classical", "blues"]);
    for genre in catalog.genres() {
        assert_eq!(genre.tracks.len(), 3);
        for track in &genre.tracks {
            assert!(track.license.is_some());
            assert!(track.thumb.is_some());
        }
    }
}

#[test]
fn track_display_prefers_artist_dash_title() {
    let catalog = parse_manifest(MANIFEST, Path::new("/assets")).unwrap();
    assert_eq!(
        catalog.playlist("lofi")[0].display(),
        "HoliznaPATREON - Last Summer"
    );
    assert_eq!(catalog.playlist("blues")[0].display(), "The Message");
}

#[test]
fn scan_assets_builds_genres_from_subdirectories() {
    let dir = tempdir().unwrap();
    let lofi = dir.path().join("lofi");
    let blues = dir.path().join("blues");
    fs::create_dir_all(&lofi).unwrap();
    fs::create_dir_all(&blues).unwrap();

    fs::write(lofi.join("lofi-02.mp3"), b"not a real mp3").unwrap();
    fs::write(lofi.join("lofi-01.mp3"), b"not a real mp3").unwrap();
    fs::write(lofi.join("lofi-01.jpg"), b"not a real jpg").unwrap();
    fs::write(lofi.join("cover.png"), b"not a real png").unwrap();
    fs::write(blues.join("track.ogg"), b"not a real ogg").unwrap();
    fs::write(blues.join("notes.txt"), b"ignore me").unwrap();

    let catalog = scan_assets(dir.path());

    // Directory order is sorted, so "blues" precedes "lofi".
    let ids: Vec<&str> = catalog.genres().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["blues", "lofi"]);
    assert_eq!(catalog.label("blues"), Some("Blues"));

    let lofi_tracks = catalog.playlist("lofi");
    assert_eq!(lofi_tracks.len(), 2);
    // Ordered by file name; ids follow playlist position.
    assert!(lofi_tracks[0].audio.ends_with("lofi-01.mp3"));
    assert_eq!(lofi_tracks[0].id, 1);
    assert_eq!(lofi_tracks[1].id, 2);

    // Sidecar image with the same stem wins; otherwise first image in dir.
    assert!(lofi_tracks[0].thumb.as_ref().unwrap().ends_with("lofi-01.jpg"));
    assert!(lofi_tracks[1].thumb.as_ref().unwrap().ends_with("cover.png"));

    // No images in the blues dir.
    assert!(catalog.playlist("blues")[0].thumb.is_none());
}

#[test]
fn scan_assets_skips_empty_genre_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    let jazz = dir.path().join("jazz");
    fs::create_dir_all(&jazz).unwrap();
    fs::write(jazz.join("a.mp3"), b"not real").unwrap();

    let catalog = scan_assets(dir.path());
    assert_eq!(catalog.genres().len(), 1);
    assert_eq!(catalog.genres()[0].id, "jazz");
}
