use std::io::{self, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::audio::{AudioBackend, AudioEvent, MediaStatus, PlaybackState};
use crate::config;
use crate::controller::PlaybackController;
use crate::library::MetadataExtractor;
use crate::ui;

use super::command::{self, Command};

/// How long to wait for console input before checking the audio channel again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// A message from the stdin reader thread.
#[derive(Debug)]
pub enum Input {
    Line(String),
    Closed,
}

/// What the console last showed, so only changes are printed.
pub struct EventLoopState {
    last_len: usize,
    last_current: Option<usize>,
    last_playback: PlaybackState,
    last_media: MediaStatus,
}

impl EventLoopState {
    pub fn new<B: AudioBackend, X: MetadataExtractor>(
        controller: &PlaybackController<B, X>,
    ) -> Self {
        Self {
            last_len: controller.playlist().len(),
            last_current: controller.playlist().current_index(),
            last_playback: controller.engine().state(),
            last_media: controller.engine().media_status(),
        }
    }
}

/// Main console loop: delivers backend notifications to the controller and
/// runs console commands. Returns when `quit` is entered or stdin closes.
pub fn run<B: AudioBackend, X: MetadataExtractor>(
    settings: &config::Settings,
    controller: &mut PlaybackController<B, X>,
    audio_rx: &Receiver<AudioEvent>,
    input_rx: &Receiver<Input>,
    state: &mut EventLoopState,
    out: &mut impl Write,
) -> io::Result<()> {
    loop {
        while let Ok(event) = audio_rx.try_recv() {
            controller.handle_audio_event(event);
        }
        report_changes(controller, state, out)?;

        match input_rx.recv_timeout(INPUT_POLL) {
            Ok(Input::Line(line)) => {
                let quit = match command::parse(&line) {
                    Ok(cmd) => handle_command(cmd, settings, controller, out)?,
                    Err(msg) => {
                        writeln!(out, "{msg}")?;
                        false
                    }
                };
                if quit {
                    return Ok(());
                }
            }
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

/// Print what changed since the last call: the playlist when its length
/// changed, the new current track, and playback state transitions.
pub fn report_changes<B: AudioBackend, X: MetadataExtractor>(
    controller: &mut PlaybackController<B, X>,
    state: &mut EventLoopState,
    out: &mut impl Write,
) -> io::Result<()> {
    if controller.take_playlist_changed() {
        let playlist = controller.playlist();
        if playlist.len() != state.last_len {
            writeln!(out, "{}", ui::render_playlist(playlist))?;
            state.last_len = playlist.len();
        }
        if playlist.current_index() != state.last_current {
            if let Some(line) = ui::now_playing(playlist) {
                writeln!(out, "{line}")?;
            }
            state.last_current = playlist.current_index();
        }
    }

    let engine = controller.engine();
    let playback_changed = engine.state() != state.last_playback;
    let became_invalid = engine.media_status() == MediaStatus::InvalidMedia
        && state.last_media != MediaStatus::InvalidMedia;
    if playback_changed || became_invalid {
        writeln!(out, "{}", ui::status_line(&*controller))?;
    }
    state.last_playback = engine.state();
    state.last_media = engine.media_status();
    out.flush()
}

fn no_such_track(out: &mut impl Write, index: usize) -> io::Result<()> {
    writeln!(out, "no track {}", index + 1)
}

/// Run one console command. Returns `Ok(true)` when the user asked to quit.
pub fn handle_command<B: AudioBackend, X: MetadataExtractor>(
    cmd: Command,
    settings: &config::Settings,
    controller: &mut PlaybackController<B, X>,
    out: &mut impl Write,
) -> io::Result<bool> {
    match cmd {
        Command::Add(paths) => {
            let added = controller.add_files(&paths);
            writeln!(out, "added {added} track(s)")?;
        }
        Command::Select(i) => {
            if !controller.select_track(i) {
                no_such_track(out, i)?;
            }
        }
        Command::Delete(i) => match controller.delete_track(i) {
            Some(track) => writeln!(out, "removed {}", track.display())?,
            None => no_such_track(out, i)?,
        },
        Command::Clear => {
            controller.clear_playlist();
            writeln!(out, "playlist cleared")?;
        }
        Command::Next => {
            if controller.skip_forward().is_none() {
                writeln!(out, "playlist is empty")?;
            }
        }
        Command::Prev => {
            if controller.skip_backward().is_none() {
                writeln!(out, "playlist is empty")?;
            }
        }
        Command::Toggle => controller.toggle_play_pause(),
        Command::Play => {
            if controller.engine().state() != PlaybackState::Playing {
                controller.toggle_play_pause();
            }
        }
        Command::Pause => {
            if controller.engine().state() == PlaybackState::Playing {
                controller.toggle_play_pause();
            }
        }
        Command::Stop => controller.stop(),
        Command::Seek(ms) => {
            let at = controller.seek(ms);
            writeln!(out, "seek to {}", ui::format_mmss(Duration::from_millis(at)))?;
        }
        Command::Forward => {
            let at = controller.scrub(true);
            writeln!(out, "seek to {}", ui::format_mmss(Duration::from_millis(at)))?;
        }
        Command::Rewind => {
            let at = controller.scrub(false);
            writeln!(out, "seek to {}", ui::format_mmss(Duration::from_millis(at)))?;
        }
        Command::Volume(percent) => {
            let gain = controller.set_volume(percent);
            writeln!(out, "volume {:.0}%", gain * 100.0)?;
        }
        Command::EqShow => writeln!(out, "{}", ui::render_equalizer(controller.equalizer()))?,
        Command::EqSet { freq_hz, gain_db } => match controller.set_eq_band(freq_hz, gain_db) {
            Ok(band) => writeln!(out, "{} {:+.1} dB", band.label(), band.gain_db)?,
            Err(e) => writeln!(out, "eq: {e}")?,
        },
        Command::EqQ { freq_hz, q } => match controller.set_eq_q(freq_hz, q) {
            Ok(band) => writeln!(out, "{} q {:.3}", band.label(), band.q)?,
            Err(e) => writeln!(out, "eq: {e}")?,
        },
        Command::EqReset => match controller.reset_eq() {
            Ok(()) => writeln!(out, "equalizer reset to flat")?,
            Err(e) => writeln!(out, "eq: {e}")?,
        },
        Command::List => writeln!(out, "{}", ui::render_playlist(controller.playlist()))?,
        Command::Status => writeln!(out, "{}", ui::status_line(&*controller))?,
        Command::Config => match settings.to_toml() {
            Ok(text) => write!(out, "{text}")?,
            Err(e) => writeln!(out, "config: {e}")?,
        },
        Command::Help => writeln!(out, "{}", ui::help_text(settings.controls.scrub_seconds))?,
        Command::Quit => return Ok(true),
        Command::Empty => {}
    }
    out.flush()?;
    Ok(false)
}
