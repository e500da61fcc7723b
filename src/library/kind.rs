use std::path::Path;

/// The container kinds the player understands.
///
/// Each kind carries its own tag layout, so metadata extraction dispatches on
/// this value rather than probing file contents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackKind {
    /// MPEG audio (`.mp3`), tagged with ID3v2.
    Mpeg,
    /// FLAC (`.flac`), tagged with Vorbis comments plus a picture list.
    Flac,
}

impl TrackKind {
    /// Classify `path` by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" => Some(Self::Mpeg),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mpeg => "mp3",
            Self::Flac => "flac",
        }
    }
}
