//! Application shell state: the selected genre and track index.
//!
//! The shell owns the track index, not the playback controller; the
//! controller reacts when the index changes. Next/Prev wrap-around policy
//! lives here, next to the catalog that defines playlist order.

mod model;

pub use model::*;
