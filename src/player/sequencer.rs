use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::catalog::Track;

use super::art::{AlbumArt, ArtBuffer, decode_thumbnail};
use super::controller::PlayerController;

/// Fixed delays used by the swap sequence. Under reduced motion every
/// timed visual collapses to zero while the step ordering is preserved.
#[derive(Debug, Clone, Copy)]
pub struct SequencerTimings {
    pub swap_delay: Duration,
    pub info_fade: Duration,
}

impl SequencerTimings {
    pub fn new(swap_delay_ms: u64, info_fade_ms: u64, reduced_motion: bool) -> Self {
        if reduced_motion {
            Self {
                swap_delay: Duration::ZERO,
                info_fade: Duration::ZERO,
            }
        } else {
            Self {
                swap_delay: Duration::from_millis(swap_delay_ms),
                info_fade: Duration::from_millis(info_fade_ms),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    FadingOut { until: Instant },
    Swapping,
    FadingIn { until: Instant },
}

/// The state machine run whenever the selected track changes:
/// `Idle → FadingOut → Swapping → FadingIn → Idle`.
///
/// Phases advance from the event loop's `tick(now)`. The fade-out deadline
/// gates the source commit; the thumbnail preload (settling with success or
/// failure) gates only the art flip, never the audio swap. An epoch counter
/// abandons superseded sequences and their preload results.
pub struct TransitionSequencer {
    phase: Phase,
    epoch: u64,
    pending: Option<Track>,
    info_visible: bool,
    art: ArtBuffer,
    timings: SequencerTimings,
    preload_tx: Sender<(u64, Option<AlbumArt>)>,
    preload_rx: Receiver<(u64, Option<AlbumArt>)>,
}

impl TransitionSequencer {
    pub fn new(timings: SequencerTimings) -> Self {
        let (preload_tx, preload_rx) = mpsc::channel();
        Self {
            phase: Phase::Idle,
            epoch: 0,
            pending: None,
            info_visible: false,
            art: ArtBuffer::new(),
            timings,
            preload_tx,
            preload_rx,
        }
    }

    /// Whether track info/art should render at full opacity.
    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    pub fn art(&self) -> Option<&AlbumArt> {
        self.art.visible()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Start the swap sequence for a newly selected track.
    ///
    /// Any in-flight sequence is abandoned entirely: only the latest
    /// requested track may ever commit its source or thumbnail.
    pub fn begin(&mut self, track: Track, now: Instant, controller: &mut PlayerController) {
        self.epoch += 1;
        self.pending = Some(track);
        self.info_visible = false;
        controller.prepare_for_swap();
        self.phase = Phase::FadingOut {
            until: now + self.timings.swap_delay,
        };
    }

    /// Tear down visuals when the playlist has no track to show.
    pub fn clear(&mut self, controller: &mut PlayerController) {
        self.epoch += 1;
        self.pending = None;
        self.phase = Phase::Idle;
        self.info_visible = false;
        self.art.clear();
        controller.unload();
    }

    /// Advance the machine. Call once per event-loop iteration.
    pub fn tick(&mut self, now: Instant, controller: &mut PlayerController) {
        match self.phase {
            Phase::FadingOut { until } if now >= until => {
                let Some(track) = self.pending.clone() else {
                    self.phase = Phase::Idle;
                    return;
                };
                controller.commit_swap(&track.audio);
                self.spawn_preload(track.thumb);
                self.phase = Phase::Swapping;
            }
            Phase::Swapping => {
                loop {
                    match self.preload_rx.try_recv() {
                        Ok((epoch, art)) if epoch == self.epoch => {
                            self.art.stage(art);
                            self.art.flip();
                            controller.finish_swap();
                            self.pending = None;
                            self.info_visible = true;
                            self.phase = Phase::FadingIn {
                                until: now + self.timings.info_fade,
                            };
                            break;
                        }
                        // Preload of an abandoned sequence: discard.
                        Ok(_) => continue,
                        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                    }
                }
            }
            Phase::FadingIn { until } if now >= until => {
                self.phase = Phase::Idle;
            }
            _ => {}
        }
    }

    fn spawn_preload(&self, thumb: Option<PathBuf>) {
        let tx = self.preload_tx.clone();
        let epoch = self.epoch;
        match thumb {
            // No thumbnail settles immediately; the flip must not block.
            None => {
                let _ = tx.send((epoch, None));
            }
            Some(path) => {
                thread::spawn(move || {
                    let art = decode_thumbnail(&path);
                    let _ = tx.send((epoch, art));
                });
            }
        }
    }
}
