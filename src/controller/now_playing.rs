use std::path::PathBuf;
use std::sync::Arc;

use crate::tags::{Cover, TrackMetadata};

/// Artwork for the loaded track, tagged with a load counter.
///
/// `id` changes every time a track is loaded, so a view can tell "same
/// picture again" from "new picture" without comparing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub id: u64,
    pub cover: Arc<Cover>,
}

/// Everything the UI shows about the loaded track.
///
/// `metadata.cover` is always `None` here; the picture lives in `cover`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub path: PathBuf,
    pub metadata: TrackMetadata,
    pub cover: Option<CoverArt>,
}

impl NowPlaying {
    /// Tag title, else the file name without extension.
    pub fn display_title(&self) -> String {
        if !self.metadata.title.is_empty() {
            return self.metadata.title.clone();
        }
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `artist - title`, the title alone, or `Unknown`.
    pub fn display_label(&self) -> String {
        let title = self.display_title();
        match (self.metadata.artist.as_str(), title.as_str()) {
            (_, "") => "Unknown".to_string(),
            ("", title) => title.to_string(),
            (artist, title) => format!("{artist} - {title}"),
        }
    }
}
