use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::backend::AudioBackend;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent};

/// `AudioBackend` backed by a `rodio` output stream on a dedicated thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    source: Option<PathBuf>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Open the default output device and start the audio thread.
    ///
    /// Notifications are delivered on `events`.
    pub fn spawn(settings: &AudioSettings, events: Sender<AudioEvent>) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let tick = Duration::from_millis(settings.position_interval_ms.max(1));

        let join = spawn_audio_thread(rx, events, ready_tx, tick);

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                source: None,
                join: Some(join),
            }),
            Ok(Err(msg)) => {
                let _ = join.join();
                Err(Error::AudioOutput(msg))
            }
            Err(_) => Err(Error::AudioOutput(
                "audio thread exited during startup".to_string(),
            )),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("audio thread is gone; dropping request");
        }
    }
}

impl AudioBackend for RodioBackend {
    fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        self.send(AudioCmd::SetSource(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }

    fn set_position(&mut self, position_ms: u64) {
        self.send(AudioCmd::SetPosition(Duration::from_millis(position_ms)));
    }

    fn set_volume(&mut self, gain: f32) {
        self.send(AudioCmd::SetVolume(gain.clamp(0.0, 1.0)));
    }

    fn source_is_set(&self) -> bool {
        self.source.is_some()
    }

    fn shutdown(&mut self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
