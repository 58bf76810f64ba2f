//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum SinkError {
    #[error("failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to decode {path:?}: {source}")]
    Decode { path: PathBuf, source: DecoderError },
}

/// A paused sink plus what the decoder told us about the source.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
    pub sample_rate: u32,
}

/// Decoders cannot always tell the length up front (VBR mp3 for instance);
/// fall back to the container properties.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<PreparedSink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SinkError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sample_rate: u32 = decoder.sample_rate().into();
    let duration = decoder.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(handle.mixer());
    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();

    Ok(PreparedSink {
        sink,
        duration,
        sample_rate,
    })
}
