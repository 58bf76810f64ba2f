use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use super::backend::AudioBackend;
use super::types::{AudioEvent, MediaStatus, PlaybackState};

/// Playback state machine on top of an `AudioBackend`.
///
/// Operations are forwarded to the backend as requests. The state, position
/// and duration seen here are the ones the backend last reported through
/// `apply_event`, so a request only shows up once the backend confirms it.
pub struct PlaybackEngine<B: AudioBackend> {
    backend: B,
    state: PlaybackState,
    media_status: MediaStatus,
    source: Option<PathBuf>,
    position_ms: u64,
    duration_ms: u64,
    volume: f32,
    sample_rate_hz: Option<u32>,
}

/// Map a volume percentage to linear gain, clamping into `[0, 100]` first.
pub fn percent_to_gain(percent: i32) -> f32 {
    percent.clamp(0, 100) as f32 / 100.0
}

impl<B: AudioBackend> PlaybackEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: PlaybackState::Stopped,
            media_status: MediaStatus::NoMedia,
            source: None,
            position_ms: 0,
            duration_ms: 0,
            volume: 1.0,
            sample_rate_hz: None,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn media_status(&self) -> MediaStatus {
        self.media_status
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Duration of the current source, 0 until the backend reports it.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sample_rate_hz(&self) -> Option<u32> {
        self.sample_rate_hz
    }

    /// Set `path` as the source and start playing it.
    pub fn load(&mut self, path: &Path) {
        info!(path = %path.display(), "loading track");
        self.source = Some(path.to_path_buf());
        self.position_ms = 0;
        self.duration_ms = 0;
        self.backend.set_source(path);
        self.backend.play();
    }

    /// Pause when playing, otherwise ask the backend to play.
    pub fn toggle_play_pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.backend.pause();
        } else {
            if !self.backend.source_is_set() {
                debug!("play requested with no source");
            }
            self.backend.play();
        }
    }

    pub fn stop(&mut self) {
        self.position_ms = 0;
        self.backend.stop();
    }

    /// Jump to `position_ms`, clamped to `[0, duration]`. While the duration
    /// is still unknown only the lower bound applies.
    pub fn seek(&mut self, position_ms: i64) -> u64 {
        let mut target = position_ms.max(0) as u64;
        if self.duration_ms > 0 {
            target = target.min(self.duration_ms);
        }
        debug!(requested = position_ms, target, "seek");
        self.backend.set_position(target);
        target
    }

    /// Set the volume from a percentage; returns the applied linear gain.
    pub fn set_volume(&mut self, percent: i32) -> f32 {
        let gain = percent_to_gain(percent);
        self.volume = gain;
        self.backend.set_volume(gain);
        gain
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.backend.shutdown(fade_out);
    }

    /// Record a notification from the backend.
    pub fn apply_event(&mut self, event: &AudioEvent) {
        match *event {
            AudioEvent::PositionChanged(ms) => self.position_ms = ms,
            AudioEvent::DurationChanged(ms) => {
                debug!(duration_ms = ms, "duration changed");
                self.duration_ms = ms;
            }
            AudioEvent::StateChanged(state) => {
                debug!(?state, "playback state changed");
                self.state = state;
            }
            AudioEvent::MediaStatusChanged(status) => {
                debug!(?status, "media status changed");
                self.media_status = status;
            }
            AudioEvent::SampleRateChanged(hz) => self.sample_rate_hz = Some(hz),
        }
    }
}
