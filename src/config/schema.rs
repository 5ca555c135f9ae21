use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadence/config.toml` or `~/.config/cadence/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENCE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume on startup, in `[0, 1]`.
    pub default_volume: f32,
    /// Delay between hiding the old track's info and committing the new
    /// audio source (milliseconds). Long enough for the fade-out to read,
    /// short enough to feel responsive.
    pub swap_delay_ms: u64,
    /// Track info fade duration after a swap (milliseconds).
    pub info_fade_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.8,
            swap_delay_ms: 180,
            info_fade_ms: 260,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds the arrow keys scrub.
    pub seek_seconds: u64,
    /// Volume change per arrow-key step, in `[0, 1]`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Fact rotation interval (milliseconds). 0 disables rotation.
    pub fact_rotate_ms: u64,
    /// Disable rotation timers and collapse all timed visual fades.
    pub reduced_motion: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Cadence · music for focus ~ ".to_string(),
            fact_rotate_ms: 60_000,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Directory audio/thumbnail paths are resolved against. Also the scan
    /// root when no manifest is used.
    pub assets_dir: String,
    /// Optional manifest path replacing the embedded catalog.
    pub manifest_path: Option<String>,
    /// Build the catalog by scanning `assets_dir/<genre>/` instead of
    /// reading a manifest.
    pub scan: bool,
    /// Genre selected on startup.
    pub default_genre: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            manifest_path: None,
            scan: false,
            default_genre: "lofi".to_string(),
        }
    }
}
