//! Transport-facing small types: the capability trait, its events and the
//! command set understood by the audio thread.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a transport can report back. Every event carries the load
/// generation it belongs to so that events from a superseded source can be
/// detected and discarded by the listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEventKind {
    /// The source's total duration is known.
    MetadataReady(Duration),
    /// Periodic elapsed-time report while playing (also emitted after seeks).
    Progress(Duration),
    /// The source is decoded and a play request will be honored.
    ReadyToPlay,
    /// Playback ran off the end of the source.
    Ended,
    /// The source could not be opened or decoded.
    Unplayable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportEvent {
    pub generation: u64,
    pub kind: TransportEventKind,
}

/// A single playable audio resource.
///
/// Exactly one listener drains `events()` for the transport's lifetime (the
/// playback controller); `shutdown()` tears the resource down and after it
/// returns no further events are produced.
pub trait Transport: Send {
    /// Replace the current source. Progress resets; `MetadataReady`,
    /// then `ReadyToPlay` or `Unplayable` follow.
    fn load(&mut self, source: &Path, generation: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    /// Drain all pending events, in emission order.
    fn events(&mut self) -> Vec<TransportEvent>;
    fn shutdown(&mut self);
}

#[derive(Debug)]
pub(super) enum TransportCmd {
    Load { source: PathBuf, generation: u64 },
    Play,
    Pause,
    SeekTo(Duration),
    SetVolume(f32),
    Quit,
}
