//! `PlaybackController`: wires the playlist, the playback engine, the
//! metadata extractor and the equalizer together.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, AudioEvent, MediaStatus, PlaybackEngine, PlaybackState};
use crate::config::{AutoplaySetting, LibrarySettings, Settings};
use crate::eq::{EqError, Equalizer, EqualizerBand};
use crate::error;
use crate::library::{MetadataExtractor, TrackRecord, expand_paths};
use crate::playlist::Playlist;

/// Owns all player state on the control thread.
///
/// UI commands come in through the public methods; backend notifications
/// through `handle_audio_event`.
pub struct PlaybackController<B: AudioBackend, X: MetadataExtractor> {
    playlist: Playlist,
    engine: PlaybackEngine<B>,
    extractor: X,
    equalizer: Equalizer,
    library: LibrarySettings,
    autoplay: AutoplaySetting,
    scrub_ms: u64,
    playlist_changed: bool,
    // Set by user stops; an `EndOfMedia` already in flight must not advance.
    stop_requested: bool,
}

impl<B: AudioBackend, X: MetadataExtractor> PlaybackController<B, X> {
    pub fn new(backend: B, extractor: X, settings: &Settings) -> error::Result<Self> {
        let eq = &settings.equalizer;
        let equalizer = Equalizer::new(eq.sample_rate_hz, eq.q, &eq.bands)?;

        let mut engine = PlaybackEngine::new(backend);
        engine.set_volume(settings.audio.volume_percent);

        Ok(Self {
            playlist: Playlist::new(),
            engine,
            extractor,
            equalizer,
            library: settings.library.clone(),
            autoplay: settings.playback.autoplay_on_add,
            scrub_ms: settings.controls.scrub_seconds.saturating_mul(1000),
            playlist_changed: false,
            stop_requested: false,
        })
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn engine(&self) -> &PlaybackEngine<B> {
        &self.engine
    }

    pub fn equalizer(&self) -> &Equalizer {
        &self.equalizer
    }

    /// True once after each change to the playlist or its current track.
    pub fn take_playlist_changed(&mut self) -> bool {
        std::mem::take(&mut self.playlist_changed)
    }

    fn mark_playlist_changed(&mut self) {
        self.playlist_changed = true;
    }

    /// Make `index` current and start playing it.
    fn play_index(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.set_current(index) else {
            return false;
        };
        let path = track.path.clone();
        self.stop_requested = false;
        self.engine.load(&path);
        self.mark_playlist_changed();
        true
    }

    /// Add files and directories to the end of the playlist.
    ///
    /// Directories are expanded to the audio files they contain. Files whose
    /// metadata cannot be read are skipped. Returns how many tracks were added.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let was_empty = self.playlist.is_empty();
        let mut first_added: Option<usize> = None;
        let mut added = 0;

        for path in expand_paths(paths, &self.library) {
            let Some(track) = self.extractor.extract(&path) else {
                debug!(path = %path.display(), "skipping file without metadata");
                continue;
            };
            let index = self.playlist.len();
            if self.playlist.add(track) {
                added += 1;
                first_added.get_or_insert(index);
            }
        }

        if added == 0 {
            return 0;
        }
        info!(added, total = self.playlist.len(), "tracks added");
        self.mark_playlist_changed();

        let autoplay = match self.autoplay {
            AutoplaySetting::Never => false,
            AutoplaySetting::FirstIntoEmpty => was_empty,
            AutoplaySetting::EveryBatch => true,
        };
        if let (true, Some(i)) = (autoplay, first_added) {
            self.play_index(i);
        }
        added
    }

    /// Play the track at `index` (e.g. picked from the list).
    pub fn select_track(&mut self, index: usize) -> bool {
        self.play_index(index)
    }

    /// Remove the track at `index`. Playback stops if it was the current one.
    pub fn delete_track(&mut self, index: usize) -> Option<TrackRecord> {
        let was_current = self.playlist.current_index() == Some(index);
        let removed = self.playlist.remove_at(index)?;
        if was_current {
            self.stop_requested = true;
            self.engine.stop();
        }
        self.mark_playlist_changed();
        Some(removed)
    }

    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
        self.stop_requested = true;
        self.engine.stop();
        self.mark_playlist_changed();
    }

    /// Play the next track, wrapping to the first. Returns the new index.
    pub fn skip_forward(&mut self) -> Option<usize> {
        let next = self.playlist.next_index(self.playlist.current_index())?;
        self.play_index(next).then_some(next)
    }

    /// Play the previous track, wrapping to the last. Returns the new index.
    pub fn skip_backward(&mut self) -> Option<usize> {
        let prev = self
            .playlist
            .previous_index(self.playlist.current_index())?;
        self.play_index(prev).then_some(prev)
    }

    pub fn toggle_play_pause(&mut self) {
        if self.engine.state() != PlaybackState::Playing {
            self.stop_requested = false;
        }
        self.engine.toggle_play_pause();
    }

    pub fn stop(&mut self) {
        self.stop_requested = true;
        self.engine.stop();
    }

    pub fn seek(&mut self, position_ms: i64) -> u64 {
        self.engine.seek(position_ms)
    }

    /// Seek relative to the last reported position.
    pub fn seek_by(&mut self, delta_ms: i64) -> u64 {
        let current = self.engine.position_ms() as i64;
        self.engine.seek(current.saturating_add(delta_ms))
    }

    /// Seek one scrub step forward or back.
    pub fn scrub(&mut self, forward: bool) -> u64 {
        let step = i64::try_from(self.scrub_ms).unwrap_or(i64::MAX);
        self.seek_by(if forward { step } else { -step })
    }

    pub fn set_volume(&mut self, percent: i32) -> f32 {
        self.engine.set_volume(percent)
    }

    /// Set a band's gain; the band is identified by its center frequency.
    pub fn set_eq_band(&mut self, freq_hz: f64, gain_db: f64) -> Result<EqualizerBand, EqError> {
        self.equalizer.set_band_gain(freq_hz, gain_db).cloned()
    }

    /// Set a band's Q; the band is identified by its center frequency.
    pub fn set_eq_q(&mut self, freq_hz: f64, q: f64) -> Result<EqualizerBand, EqError> {
        self.equalizer.set_band_q(freq_hz, q).cloned()
    }

    pub fn reset_eq(&mut self) -> Result<(), EqError> {
        self.equalizer.reset()
    }

    /// React to a notification from the audio backend.
    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        self.engine.apply_event(&event);

        match event {
            AudioEvent::MediaStatusChanged(MediaStatus::EndOfMedia) => {
                if self.stop_requested {
                    debug!("end of track after a stop request, not advancing");
                    return;
                }
                if let Some(next) = self.playlist.next_index(self.playlist.current_index()) {
                    debug!(next, "end of track, advancing");
                    self.play_index(next);
                }
            }
            AudioEvent::MediaStatusChanged(MediaStatus::InvalidMedia) => {
                if let Some(track) = self.playlist.current_track() {
                    warn!(path = %track.path.display(), "current track cannot be played");
                }
            }
            AudioEvent::SampleRateChanged(hz) => {
                let hz = f64::from(hz);
                if hz != self.equalizer.sample_rate_hz() {
                    if let Err(e) = self.equalizer.set_sample_rate(hz) {
                        warn!(
                            error = %e,
                            sample_rate_hz = hz,
                            "equalizer keeps its previous sample rate"
                        );
                    }
                }
            }
            _ => {}
        }
    }

    /// Release the audio device.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.engine.shutdown(fade_out);
    }
}
