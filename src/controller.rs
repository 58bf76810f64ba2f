//! The composition root: the `PlaybackController` owns the playlist and the
//! playback engine and is the only thing the UI layer talks to.

mod model;

pub use model::*;
