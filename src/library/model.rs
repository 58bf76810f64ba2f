use std::path::PathBuf;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Metadata for one playable file. `path` identifies the track within a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_seconds: u64,
}

impl TrackRecord {
    /// A record for `path` with placeholder tags: the file name as title and
    /// unknown artist/album.
    pub fn untagged(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            title,
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_seconds: 0,
        }
    }

    /// Whether the record can be put in a playlist.
    pub fn is_well_formed(&self) -> bool {
        !self.path.as_os_str().is_empty() && !self.path.to_string_lossy().trim().is_empty()
    }

    /// "Artist - Title", or just the title when the artist is unknown.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() || artist == UNKNOWN_ARTIST {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }
}
