use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn scan_dir(dir: &Path, settings: &LibrarySettings, out: &mut Vec<PathBuf>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(path.to_path_buf());
        }
    }
}

/// Turn the paths a user hands over into a flat list of files.
///
/// Files are passed through untouched, whatever their extension, so the
/// extractor decides whether they are playable. Directories are walked in
/// file-name order and contribute only files with a configured audio
/// extension. Paths that do not exist are passed through as well; extraction
/// will reject them.
pub fn expand_paths<P: AsRef<Path>>(paths: &[P], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        let p = p.as_ref();
        if p.is_dir() {
            scan_dir(p, settings, &mut out);
        } else {
            out.push(p.to_path_buf());
        }
    }
    out
}
