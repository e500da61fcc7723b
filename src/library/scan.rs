use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::kind::TrackKind;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Enumerate every supported audio file under `dir`.
///
/// Entries are visited sorted by file name at each directory level, so two
/// scans of an unchanged tree produce the same sequence. A missing root or a
/// root that is not a directory yields an empty list; unreadable entries are
/// skipped.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!("scan root {} is not a readable directory", dir.display());
        return Vec::new();
    }

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

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && TrackKind::from_path(path).is_some() {
            paths.push(path.to_path_buf());
        }
    }

    info!("found {} tracks under {}", paths.len(), dir.display());
    paths
}
