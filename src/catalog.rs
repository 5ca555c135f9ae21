//! Playlist catalog: the fixed mapping from genre to ordered track lists.
//!
//! A catalog is either parsed from a TOML manifest (the embedded default or
//! a user-supplied file) or discovered by scanning an assets directory laid
//! out as `<root>/<genre>/*.mp3`.

mod manifest;
mod model;
mod scan;

pub use manifest::*;
pub use model::*;
pub use scan::*;

#[cfg(test)]
mod tests;
