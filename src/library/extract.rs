//! Tag reading via `lofty`.

use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::warn;

use super::model::TrackRecord;

/// Produces a `TrackRecord` for a file, or `None` when the file cannot be read.
///
/// Implementations absorb and log their own errors.
pub trait MetadataExtractor {
    fn extract(&self, path: &Path) -> Option<TrackRecord>;
}

/// Reads duration and title/artist/album tags with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyExtractor;

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> Option<TrackRecord> {
        let tagged = match lofty::read_from_path(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "metadata extraction failed");
                return None;
            }
        };

        let mut record = TrackRecord::untagged(path);
        record.duration_seconds = tagged.properties().duration().as_secs();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = non_blank(tag.title()) {
                record.title = v;
            }
            if let Some(v) = non_blank(tag.artist()) {
                record.artist = v;
            }
            if let Some(v) = non_blank(tag.album()) {
                record.album = v;
            }
        }

        Some(record)
    }
}
