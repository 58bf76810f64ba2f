//! A scripted `AudioBackend` for tests.
//!
//! It behaves like a well-mannered backend: requests are recorded, and the
//! resulting notifications are queued on a channel for the test to pump into
//! the engine or controller, the same way the runtime does.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use super::backend::AudioBackend;
use super::types::{AudioEvent, MediaStatus, PlaybackState};

/// Duration the mock reports for every source.
pub const MOCK_DURATION_MS: u64 = 180_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource(PathBuf),
    Play,
    Pause,
    Stop,
    SetPosition(u64),
    SetVolume(f32),
}

pub struct MockBackend {
    events: Sender<AudioEvent>,
    source: Option<PathBuf>,
    state: PlaybackState,
    pub calls: Vec<Call>,
}

impl MockBackend {
    pub fn new() -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel();
        let backend = Self {
            events: tx,
            source: None,
            state: PlaybackState::Stopped,
            calls: Vec::new(),
        };
        (backend, rx)
    }

    /// Sources handed to `set_source`, in order.
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetSource(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            let _ = self.events.send(AudioEvent::StateChanged(state));
        }
    }
}

impl AudioBackend for MockBackend {
    fn set_source(&mut self, path: &Path) {
        self.calls.push(Call::SetSource(path.to_path_buf()));
        self.set_state(PlaybackState::Stopped);
        self.source = Some(path.to_path_buf());
        let _ = self.events.send(AudioEvent::DurationChanged(MOCK_DURATION_MS));
        let _ = self
            .events
            .send(AudioEvent::MediaStatusChanged(MediaStatus::Loaded));
        let _ = self.events.send(AudioEvent::PositionChanged(0));
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.source.is_some() {
            self.set_state(PlaybackState::Playing);
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.set_state(PlaybackState::Stopped);
        let _ = self.events.send(AudioEvent::PositionChanged(0));
    }

    fn set_position(&mut self, position_ms: u64) {
        self.calls.push(Call::SetPosition(position_ms));
        let _ = self.events.send(AudioEvent::PositionChanged(position_ms));
    }

    fn set_volume(&mut self, gain: f32) {
        self.calls.push(Call::SetVolume(gain));
    }

    fn source_is_set(&self) -> bool {
        self.source.is_some()
    }
}
