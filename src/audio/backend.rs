use std::path::Path;
use std::time::Duration;

/// The decode/output backend behind `PlaybackEngine`.
///
/// Every call is a request. Results arrive later as `AudioEvent`s on the
/// channel the backend was created with; nothing here blocks waiting for the
/// audio device. A `set_source` issued while an earlier one is still being
/// handled supersedes it.
pub trait AudioBackend {
    fn set_source(&mut self, path: &Path);
    /// Start or resume. Ignored when no source is set.
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_position(&mut self, position_ms: u64);
    /// Linear gain in `[0.0, 1.0]`.
    fn set_volume(&mut self, gain: f32);
    fn source_is_set(&self) -> bool;

    /// Release the output device, fading out first when `fade_out` is non-zero.
    fn shutdown(&mut self, _fade_out: Duration) {}
}
