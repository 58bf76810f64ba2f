use crate::config;
use crate::error::Error;

/// Load settings, falling back to defaults when the file is unreadable or
/// invalid. The second value says why defaults were used; it is returned
/// rather than logged because logging is configured from the result.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let problem = match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => return (s, None),
            Err(msg) => Error::InvalidConfig(msg),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => Error::from(e),
    };
    (
        config::Settings::default(),
        Some(format!("{problem}; using defaults")),
    )
}
