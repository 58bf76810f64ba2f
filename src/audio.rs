//! Playback: the engine state machine and the audio backend it drives.
//!
//! `PlaybackEngine` holds playback state on the control thread. The
//! production backend, `RodioBackend`, forwards requests to a worker thread
//! that owns the `rodio` output stream and reports back through `AudioEvent`s.

mod backend;
mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::AudioBackend;
pub use engine::PlaybackEngine;
pub use player::RodioBackend;
pub use types::{AudioEvent, MediaStatus, PlaybackState};

#[cfg(test)]
pub(crate) mod testing;
