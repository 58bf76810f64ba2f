use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so it stays apart from the console.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
