use serde::{Deserialize, Serialize};

use crate::eq::{DEFAULT_BANDS_HZ, DEFAULT_Q};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub equalizer: EqualizerSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial volume in percent (0-100).
    pub volume_percent: i32,
    /// How often the audio thread reports the playback position and checks
    /// for the end of the track (milliseconds).
    pub position_interval_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume_percent: 100,
            position_interval_ms: 200,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub with `ff` / `rew`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// When adding files should start playback on its own.
    pub autoplay_on_add: AutoplaySetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplaySetting {
    /// Adding files never starts playback.
    #[serde(alias = "off", alias = "no")]
    Never,
    /// Play the first added track when the playlist was empty before the batch.
    #[default]
    #[serde(alias = "first_into_empty", alias = "when-empty", alias = "when_empty")]
    FirstIntoEmpty,
    /// Play the first track of every added batch.
    #[serde(alias = "every_batch", alias = "always")]
    EveryBatch,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EqualizerSettings {
    /// Sample rate assumed until a track reports its own (Hz).
    pub sample_rate_hz: f64,
    /// Q shared by all bands.
    pub q: f64,
    /// Band center frequencies (Hz).
    pub bands: Vec<f64>,
}

impl Default for EqualizerSettings {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100.0,
            q: DEFAULT_Q,
            bands: DEFAULT_BANDS_HZ.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions picked up when a directory is added
    /// (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
