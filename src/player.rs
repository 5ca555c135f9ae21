//! The playback core: controller, transition sequencer and album art.
//!
//! The controller is the single owner of the media transport; the sequencer
//! runs the fade-out/swap/fade-in machine whenever the selected track
//! changes. Everything the UI renders about playback is derived from
//! [`PlaybackState`].

mod art;
mod controller;
mod sequencer;
mod state;

pub use art::*;
pub use controller::*;
pub use sequencer::*;
pub use state::*;

#[cfg(test)]
pub(crate) mod tests;
