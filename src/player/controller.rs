use std::path::Path;
use std::time::Duration;

use crate::transport::{Transport, TransportEventKind};

use super::state::{DEFAULT_VOLUME, PlaybackState};

/// Signals the controller raises for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSignal {
    /// The current track played to completion; the shell is expected to
    /// advance the track index (the auto-play intent is already armed).
    TrackEnded,
}

/// Single authoritative owner of one [`Transport`] instance.
///
/// All playback mutations — buttons, keyboard, mouse, MPRIS, the sequencer —
/// go through the operations below; nothing else talks to the transport.
pub struct PlayerController {
    transport: Box<dyn Transport>,
    state: PlaybackState,
    /// Load generation; bumped on every source commit so events from a
    /// superseded source are detected and discarded.
    generation: u64,
    /// A source has been committed for the current generation.
    loaded: bool,
    /// `ReadyToPlay` seen for the current generation.
    ready: bool,
    /// A play was requested before the source was ready. Retried at most
    /// once, when `ReadyToPlay` arrives; otherwise settles to paused.
    pending_play: bool,
}

impl PlayerController {
    pub fn new(transport: Box<dyn Transport>, initial_volume: f32) -> Self {
        let state = PlaybackState::new(initial_volume);
        let mut controller = Self {
            transport,
            state,
            generation: 0,
            loaded: false,
            ready: false,
            pending_play: false,
        };
        controller.transport.set_volume(controller.state.volume);
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn has_track(&self) -> bool {
        self.loaded
    }

    /// Flip play/pause intent and drive the transport to match. No-op when
    /// no track is loaded.
    pub fn toggle_play(&mut self) {
        if !self.loaded {
            return;
        }
        if self.state.is_playing {
            self.state.is_playing = false;
            self.pending_play = false;
            self.transport.pause();
        } else {
            self.state.is_playing = true;
            self.request_play();
        }
    }

    /// Explicit play (MPRIS `Play`). No-op when already playing.
    pub fn play(&mut self) {
        if !self.loaded || self.state.is_playing {
            return;
        }
        self.state.is_playing = true;
        self.request_play();
    }

    /// Explicit pause (MPRIS `Pause`). No-op when already paused.
    pub fn pause(&mut self) {
        if !self.loaded || !self.state.is_playing {
            return;
        }
        self.state.is_playing = false;
        self.pending_play = false;
        self.transport.pause();
    }

    fn request_play(&mut self) {
        if self.ready {
            self.transport.play();
        } else {
            self.pending_play = true;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        if volume > 0.0 {
            self.state.last_nonzero_volume = volume;
        }
        self.state.is_muted = volume <= 0.0;
        self.transport.set_volume(volume);
    }

    pub fn step_volume(&mut self, delta: f32) {
        self.set_volume(self.state.volume + delta);
    }

    /// Mute to zero, or restore the remembered pre-mute volume.
    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            let restore = if self.state.last_nonzero_volume > 0.0 {
                self.state.last_nonzero_volume
            } else {
                DEFAULT_VOLUME
            };
            self.set_volume(restore);
        } else {
            self.set_volume(0.0);
        }
    }

    /// Seek to an absolute position, clamped to `[0, duration]`. Ignored
    /// until metadata is known. `current_time` updates optimistically; the
    /// transport's own progress reports confirm it.
    pub fn seek_to(&mut self, position: Duration) {
        if !self.loaded || self.state.duration.is_zero() {
            return;
        }
        let clamped = position.min(self.state.duration);
        self.state.current_time = clamped;
        self.transport.seek_to(clamped);
    }

    /// Relative seek in seconds (negative scrubs backwards, clamped at 0).
    pub fn seek_by(&mut self, delta_secs: i64) {
        if !self.loaded || self.state.duration.is_zero() {
            return;
        }
        let current = self.state.current_time.as_secs_f64();
        let target = (current + delta_secs as f64).max(0.0);
        self.seek_to(Duration::from_secs_f64(target));
    }

    /// Arm the one-shot auto-play intent for a pending track change.
    pub fn arm_autoplay(&mut self) {
        self.state.auto_play_intent = true;
    }

    /// Sequencer step: silence the old track before its visuals fade out so
    /// stale audio never bleeds under the new track.
    pub(crate) fn prepare_for_swap(&mut self) {
        self.state.is_playing = false;
        self.pending_play = false;
        self.transport.pause();
    }

    /// Sequencer step: commit the new source. Progress resets so stale
    /// numbers are never shown against the new track.
    pub(crate) fn commit_swap(&mut self, source: &Path) {
        self.generation += 1;
        self.loaded = true;
        self.ready = false;
        self.pending_play = false;
        self.state.current_time = Duration::ZERO;
        self.state.duration = Duration::ZERO;
        self.transport.load(source, self.generation);
    }

    /// Sequencer step: consume the auto-play intent once the swap settled.
    pub(crate) fn finish_swap(&mut self) {
        if self.state.auto_play_intent {
            self.state.auto_play_intent = false;
            self.state.is_playing = true;
            self.request_play();
        }
    }

    /// Drop the current source entirely (empty playlist / unknown genre).
    pub fn unload(&mut self) {
        self.generation += 1;
        self.loaded = false;
        self.ready = false;
        self.pending_play = false;
        self.state.is_playing = false;
        self.state.current_time = Duration::ZERO;
        self.state.duration = Duration::ZERO;
        self.transport.pause();
    }

    /// Drain transport events into derived state. Events from superseded
    /// generations are discarded here, in one place.
    pub fn drain_transport(&mut self) -> Vec<PlayerSignal> {
        let mut signals = Vec::new();

        for event in self.transport.events() {
            if event.generation != self.generation {
                continue;
            }
            match event.kind {
                TransportEventKind::MetadataReady(duration) => {
                    self.state.duration = duration;
                }
                TransportEventKind::Progress(elapsed) => {
                    self.state.current_time = if self.state.duration.is_zero() {
                        elapsed
                    } else {
                        elapsed.min(self.state.duration)
                    };
                }
                TransportEventKind::ReadyToPlay => {
                    self.ready = true;
                    if self.pending_play {
                        self.pending_play = false;
                        if self.state.is_playing {
                            self.transport.play();
                        }
                    }
                }
                TransportEventKind::Ended => {
                    self.state.is_playing = false;
                    self.state.auto_play_intent = true;
                    signals.push(PlayerSignal::TrackEnded);
                }
                TransportEventKind::Unplayable => {
                    self.state.is_playing = false;
                    self.pending_play = false;
                    self.ready = false;
                    self.state.duration = Duration::ZERO;
                }
            }
        }

        signals
    }

    pub fn shutdown(&mut self) {
        self.transport.shutdown();
    }
}
