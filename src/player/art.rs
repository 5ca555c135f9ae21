use std::path::Path;

use image::imageops::FilterType;

/// Pixel dimensions decoded thumbnails are normalized to. Rendering stacks
/// two pixels per terminal cell with the upper-half-block glyph, so the art
/// occupies `ART_WIDTH` columns by `ART_HEIGHT / 2` rows.
pub const ART_WIDTH: u32 = 40;
pub const ART_HEIGHT: u32 = 40;

/// A decoded, normalized album thumbnail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumArt {
    pub width: u32,
    pub height: u32,
    pixels: Vec<(u8, u8, u8)>,
}

impl AlbumArt {
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Decode and downsample a thumbnail. `None` on any failure; the caller
/// treats a failed preload the same as a settled one.
pub fn decode_thumbnail(path: &Path) -> Option<AlbumArt> {
    let img = image::open(path).ok()?;
    let rgb = img
        .resize_exact(ART_WIDTH, ART_HEIGHT, FilterType::Triangle)
        .to_rgb8();
    let pixels = rgb.pixels().map(|p| (p.0[0], p.0[1], p.0[2])).collect();
    Some(AlbumArt {
        width: ART_WIDTH,
        height: ART_HEIGHT,
        pixels,
    })
}

/// Two-slot double buffer for album art. The outgoing image stays rendered
/// until the incoming one is staged and flipped in, so a track swap never
/// shows a blank frame.
#[derive(Debug, Default)]
pub struct ArtBuffer {
    slots: [Option<AlbumArt>; 2],
    visible: usize,
}

impl ArtBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Option<&AlbumArt> {
        self.slots[self.visible].as_ref()
    }

    pub fn visible_index(&self) -> usize {
        self.visible
    }

    /// Stage the incoming image (or a blank) in the hidden slot.
    pub fn stage(&mut self, art: Option<AlbumArt>) {
        self.slots[1 - self.visible] = art;
    }

    /// Swap which slot is rendered.
    pub fn flip(&mut self) {
        self.visible = 1 - self.visible;
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }
}
