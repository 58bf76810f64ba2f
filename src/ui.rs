//! Plain-text rendering of the player state for the console.

use std::time::Duration;

use crate::audio::{AudioBackend, MediaStatus, PlaybackState};
use crate::controller::PlaybackController;
use crate::eq::Equalizer;
use crate::library::{MetadataExtractor, TrackRecord};
use crate::playlist::Playlist;

const CONTROLS: &[(&str, &str)] = &[
    ("add <path>...", "add files or directories (quote paths with spaces)"),
    ("list", "show the playlist"),
    ("select <n>", "play track n"),
    ("delete <n>", "remove track n"),
    ("clear", "empty the playlist"),
    ("next / prev", "skip forward / backward"),
    ("toggle", "play or pause"),
    ("play / pause", "resume / pause"),
    ("stop", "stop and rewind"),
    ("seek <ms|m:ss>", "jump within the track"),
    ("ff / rew", "scrub forward / back"),
    ("volume <0-100>", "set the volume"),
    ("eq", "show equalizer bands"),
    ("eq <freq> <dB>", "set a band's gain"),
    ("eq q <freq> <q>", "set a band's Q"),
    ("eq reset", "flatten all bands"),
    ("status", "show playback status"),
    ("config", "show effective settings"),
    ("quit", "exit"),
];

pub fn help_text(scrub_seconds: u64) -> String {
    let width = CONTROLS.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = CONTROLS
        .iter()
        .map(|(k, v)| format!("  {k:<width$}  {v}"))
        .collect();
    lines.push(format!("  (ff / rew move by {scrub_seconds}s)"));
    lines.join("\n")
}

pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn format_ms(ms: u64) -> String {
    format_mmss(Duration::from_millis(ms))
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "stopped",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
    }
}

fn track_line(index: usize, track: &TrackRecord, current: bool) -> String {
    let marker = if current { '>' } else { ' ' };
    format!(
        "{marker} {:>3}. {} [{}]",
        index + 1,
        track.display(),
        format_mmss(Duration::from_secs(track.duration_seconds))
    )
}

/// The playlist, one numbered line per track, current track marked with `>`.
pub fn render_playlist(playlist: &Playlist) -> String {
    if playlist.is_empty() {
        return "playlist is empty".to_string();
    }
    let current = playlist.current_index();
    playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, t)| track_line(i, t, current == Some(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn now_playing(playlist: &Playlist) -> Option<String> {
    let i = playlist.current_index()?;
    let track = playlist.get(i)?;
    Some(format!(
        "now playing {}/{}: {}",
        i + 1,
        playlist.len(),
        track.display()
    ))
}

pub fn status_line<B: AudioBackend, X: MetadataExtractor>(
    controller: &PlaybackController<B, X>,
) -> String {
    let engine = controller.engine();
    let mut parts = vec![format!("[{}]", state_label(engine.state()))];

    // After the current track is deleted the playlist points at a neighbour
    // while the engine still holds the old source.
    match (controller.playlist().current_track(), engine.source()) {
        (Some(track), Some(source)) if track.path == source => parts.push(track.display()),
        (_, Some(source)) => parts.push(
            source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string()),
        ),
        _ => {}
    }
    if engine.media_status() == MediaStatus::InvalidMedia {
        parts.push("(cannot play this file)".to_string());
    }
    parts.push(format!(
        "{} / {}",
        format_ms(engine.position_ms()),
        format_ms(engine.duration_ms())
    ));
    parts.push(format!("vol {:.0}%", engine.volume() * 100.0));
    if let Some(hz) = engine.sample_rate_hz() {
        parts.push(format!("{hz} Hz"));
    }
    parts.join("  ")
}

/// One line per band: label, gain and the five coefficients.
pub fn render_equalizer(eq: &Equalizer) -> String {
    let mut lines = vec![format!("sample rate {:.0} Hz", eq.sample_rate_hz())];
    for band in eq.bands() {
        let [b0, b1, b2, a1, a2] = band.coefficients;
        lines.push(format!(
            "  {:>7} {:+5.1} dB  q {:.3}  b=[{b0:.6}, {b1:.6}, {b2:.6}] a=[1, {a1:.6}, {a2:.6}]",
            band.label(),
            band.gain_db,
            band.q,
        ));
    }
    lines.join("\n")
}
