use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::eq::validate_band;

/// Upper bound for `controls.scrub_seconds` (one hour).
const MAX_SCRUB_SECONDS: u64 = 3600;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CADENZA__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=100).contains(&self.audio.volume_percent) {
            return Err("audio.volume_percent must be within 0..=100".to_string());
        }
        if self.audio.position_interval_ms == 0 {
            return Err("audio.position_interval_ms must be >= 1".to_string());
        }
        if !(1..=MAX_SCRUB_SECONDS).contains(&self.controls.scrub_seconds) {
            return Err(format!(
                "controls.scrub_seconds must be within 1..={MAX_SCRUB_SECONDS}"
            ));
        }
        if self.equalizer.bands.is_empty() {
            return Err("equalizer.bands must not be empty".to_string());
        }
        for &f in &self.equalizer.bands {
            validate_band(f, self.equalizer.sample_rate_hz, self.equalizer.q)
                .map_err(|e| format!("equalizer: {e}"))?;
        }
        Ok(())
    }

    /// The effective settings as TOML, for display.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `CADENZA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadenza/config.toml`
/// or `~/.config/cadenza/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("cadenza").join("config.toml"))
}
