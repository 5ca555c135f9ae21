//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
///
/// Open/decode failures are reported, not panicked on: an unplayable file
/// must leave the player in a recoverable paused state.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    source: &Path,
    start_at: Duration,
) -> Result<Sink, Box<dyn std::error::Error + Send + Sync>> {
    let file = File::open(source)?;

    let decoded = Decoder::new(BufReader::new(file))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(decoded);
    sink.pause();
    Ok(sink)
}
