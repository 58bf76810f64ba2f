use std::path::Path;

use tracing::debug;

use crate::library::TrackRecord;

/// Ordered list of tracks with an optional current position.
///
/// `current` is always `None` or a valid index into `tracks`.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<TrackRecord>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&TrackRecord> {
        self.tracks.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&TrackRecord> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Index of the track whose path is `path`.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    /// Append `track`. Returns false (and leaves the playlist untouched) for
    /// records without a path or whose path is already present.
    pub fn add(&mut self, track: TrackRecord) -> bool {
        if !track.is_well_formed() {
            debug!("rejected track without a file path");
            return false;
        }
        if self.position_of(&track.path).is_some() {
            debug!(path = %track.path.display(), "rejected duplicate track");
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove and return the track at `index`, keeping `current` pointing at
    /// a valid entry.
    pub fn remove_at(&mut self, index: usize) -> Option<TrackRecord> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);

        self.current = match self.current {
            Some(c) if index < c => Some(c - 1),
            Some(c) if index == c => {
                if self.tracks.is_empty() {
                    None
                } else {
                    // The following track slides into the removed slot.
                    Some(c.min(self.tracks.len() - 1))
                }
            }
            other => other,
        };

        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Make `index` current. Returns `None` and leaves `current` unchanged if
    /// `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> Option<&TrackRecord> {
        if index >= self.tracks.len() {
            return None;
        }
        self.current = Some(index);
        self.tracks.get(index)
    }

    /// Index after `current`, wrapping to the first track. `None` as
    /// `current` starts from the top.
    pub fn next_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match current {
            Some(c) => (c + 1) % len,
            None => 0,
        })
    }

    /// Index before `current`, wrapping to the last track. `None` as
    /// `current` starts from the bottom.
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match current {
            Some(c) => (c % len + len - 1) % len,
            None => len - 1,
        })
    }
}
