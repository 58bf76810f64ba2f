use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::sink::create_sink_at;
use super::types::{AudioCmd, AudioEvent, MediaStatus, PlaybackState};

/// State owned by the audio thread.
struct Worker<'a> {
    stream: &'a OutputStream,
    events: Sender<AudioEvent>,
    source: Option<PathBuf>,
    sink: Option<Sink>,
    state: PlaybackState,
    volume: f32,
    // `Sink::get_pos` counts from where the sink was built; a sink rebuilt
    // with `skip_duration` starts at this offset.
    offset: Duration,
}

impl<'a> Worker<'a> {
    fn new(stream: &'a OutputStream, events: Sender<AudioEvent>) -> Self {
        Self {
            stream,
            events,
            source: None,
            sink: None,
            state: PlaybackState::Stopped,
            volume: 1.0,
            offset: Duration::ZERO,
        }
    }

    fn emit(&self, event: AudioEvent) {
        // The control thread going away means we are shutting down.
        let _ = self.events.send(event);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(AudioEvent::StateChanged(state));
        }
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.offset = Duration::ZERO;
    }

    /// Build a paused sink for the current source at `start_at`. Reports
    /// `InvalidMedia` and forgets the source when it cannot be decoded.
    fn build_sink(&mut self, start_at: Duration) -> bool {
        let Some(path) = self.source.clone() else {
            return false;
        };
        match create_sink_at(self.stream, &path, start_at) {
            Ok(prepared) => {
                prepared.sink.set_volume(self.volume);
                self.sink = Some(prepared.sink);
                self.offset = start_at;
                if let Some(d) = prepared.duration {
                    self.emit(AudioEvent::DurationChanged(d.as_millis() as u64));
                }
                self.emit(AudioEvent::SampleRateChanged(prepared.sample_rate));
                true
            }
            Err(e) => {
                warn!(error = %e, "cannot play source");
                self.source = None;
                self.set_state(PlaybackState::Stopped);
                self.emit(AudioEvent::MediaStatusChanged(MediaStatus::InvalidMedia));
                false
            }
        }
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::SetSource(path) => {
                self.drop_sink();
                self.set_state(PlaybackState::Stopped);
                self.source = Some(path);
                if self.build_sink(Duration::ZERO) {
                    self.emit(AudioEvent::MediaStatusChanged(MediaStatus::Loaded));
                    self.emit(AudioEvent::PositionChanged(0));
                }
            }
            AudioCmd::Play => {
                if self.state == PlaybackState::Playing || self.source.is_none() {
                    return;
                }
                if self.sink.is_none() && !self.build_sink(Duration::ZERO) {
                    return;
                }
                if let Some(ref s) = self.sink {
                    s.play();
                }
                self.set_state(PlaybackState::Playing);
            }
            AudioCmd::Pause => {
                if self.state == PlaybackState::Playing {
                    if let Some(ref s) = self.sink {
                        s.pause();
                    }
                    self.set_state(PlaybackState::Paused);
                }
            }
            AudioCmd::Stop => {
                self.drop_sink();
                self.set_state(PlaybackState::Stopped);
                self.emit(AudioEvent::PositionChanged(0));
            }
            AudioCmd::SetPosition(pos) => {
                if self.sink.is_none() {
                    return;
                }
                let seeked = self.sink.as_ref().is_some_and(|s| s.try_seek(pos).is_ok());
                if seeked {
                    self.offset = Duration::ZERO;
                } else {
                    // Scrubbing fallback: rebuild the sink and skip into the file.
                    debug!(?pos, "seek unsupported by decoder, rebuilding sink");
                    self.drop_sink();
                    if !self.build_sink(pos) {
                        return;
                    }
                    if self.state == PlaybackState::Playing {
                        if let Some(ref s) = self.sink {
                            s.play();
                        }
                    }
                }
                self.emit(AudioEvent::PositionChanged(self.position().as_millis() as u64));
            }
            AudioCmd::SetVolume(gain) => {
                self.volume = gain;
                if let Some(ref s) = self.sink {
                    s.set_volume(gain);
                }
            }
            // Handled by the thread loop.
            AudioCmd::Quit { .. } => {}
        }
    }

    /// Periodic check for end of media and position reporting.
    fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let finished = self.sink.as_ref().is_none_or(|s| s.empty());
        if finished {
            self.drop_sink();
            self.set_state(PlaybackState::Stopped);
            self.emit(AudioEvent::MediaStatusChanged(MediaStatus::EndOfMedia));
        } else {
            self.emit(AudioEvent::PositionChanged(self.position().as_millis() as u64));
        }
    }

    fn fade_out(&mut self, fade_out_ms: u64) {
        let Some(ref sink) = self.sink else {
            return;
        };
        if self.state == PlaybackState::Playing && fade_out_ms > 0 {
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(self.volume * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
        }
        sink.set_volume(0.0);
        self.drop_sink();
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    ready: SyncSender<Result<(), String>>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => {
                let _ = ready.send(Ok(()));
                s
            }
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy next to the console prompt.
        stream.log_on_drop(false);

        let mut worker = Worker::new(&stream, events);

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    worker.fade_out(fade_out_ms);
                    worker.set_state(PlaybackState::Stopped);
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread exiting");
    })
}
