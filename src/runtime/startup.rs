use std::io::{self, Write};
use std::path::PathBuf;

use crate::audio::AudioBackend;
use crate::controller::PlaybackController;
use crate::library::MetadataExtractor;
use crate::ui;

/// Add the paths given on the command line, then show the playlist and help.
pub fn apply_startup_paths<B: AudioBackend, X: MetadataExtractor>(
    controller: &mut PlaybackController<B, X>,
    paths: &[PathBuf],
    scrub_seconds: u64,
    out: &mut impl Write,
) -> io::Result<()> {
    if !paths.is_empty() {
        let added = controller.add_files(paths);
        writeln!(out, "added {added} track(s)")?;
        writeln!(out, "{}", ui::render_playlist(controller.playlist()))?;
        if let Some(line) = ui::now_playing(controller.playlist()) {
            writeln!(out, "{line}")?;
        }
        // The listing above already reflects the change.
        controller.take_playlist_changed();
    }
    writeln!(out, "{}", ui::help_text(scrub_seconds))?;
    out.flush()
}
