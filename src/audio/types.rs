//! Audio-related small types.
//!
//! Playback/media states, the notifications a backend emits, and the
//! commands the rodio backend sends to its worker thread.

use std::path::PathBuf;
use std::time::Duration;

/// The playback state reported by the backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What the backend knows about the current source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MediaStatus {
    /// No source has been set.
    #[default]
    NoMedia,
    /// The source was opened and decoding can start.
    Loaded,
    /// The source played to its end.
    EndOfMedia,
    /// The source could not be opened or decoded.
    InvalidMedia,
}

/// Notifications emitted by an audio backend.
///
/// They are produced on the backend's own thread and must be handed to the
/// control thread before they reach the engine or controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    StateChanged(PlaybackState),
    MediaStatusChanged(MediaStatus),
    /// Sample rate of the decoded source in Hz.
    SampleRateChanged(u32),
}

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current source; playback stops until `Play`.
    SetSource(PathBuf),
    Play,
    Pause,
    /// Stop and rewind to the start of the source.
    Stop,
    SetPosition(Duration),
    /// Linear gain in `[0.0, 1.0]`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
