use std::time::Duration;

/// Volume used on first start and as the unmute fallback when no non-zero
/// volume was ever set.
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Derived playback state published for rendering.
///
/// `is_playing` is intent, not hardware truth: the transport is driven to
/// match it. `current_time`/`duration` mirror transport progress reports;
/// `duration` stays zero until the source's metadata is known.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: Duration,
    pub duration: Duration,
    pub volume: f32,
    pub is_muted: bool,
    /// Restore-on-unmute memory. Refreshed by every non-zero volume change
    /// so unmuting restores the pre-mute volume exactly.
    pub last_nonzero_volume: f32,
    /// One-shot: set by whoever requests a track change (or by completion),
    /// consumed exactly once by the transition sequencer.
    pub auto_play_intent: bool,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            is_playing: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            volume,
            is_muted: volume <= 0.0,
            last_nonzero_volume: if volume > 0.0 { volume } else { DEFAULT_VOLUME },
            auto_play_intent: false,
        }
    }

    /// Progress through the current track in `[0, 1]`; zero until metadata
    /// is known.
    pub fn progress_ratio(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.current_time.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
