//! Ordered track list plus the "current track" cursor.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::{LibrarySettings, PlayModeSetting};
use crate::library::scan;

/// How `advance`/`previous` pick the next index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Step through the list in order, wrapping at either end.
    #[default]
    Orderly,
    /// Pick uniformly from the whole list (the current track may repeat).
    Random,
}

impl PlayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orderly => Self::Random,
            Self::Random => Self::Orderly,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Orderly => "Orderly",
            Self::Random => "Random",
        }
    }
}

impl From<PlayModeSetting> for PlayMode {
    fn from(setting: PlayModeSetting) -> Self {
        match setting {
            PlayModeSetting::Orderly => Self::Orderly,
            PlayModeSetting::Random => Self::Random,
        }
    }
}

/// Track paths in scan (or caller-given) order and an optional cursor.
///
/// The cursor is either `None` or a valid index; replacing the sequence
/// always clears it. Navigation helpers only compute indices, the owner
/// decides when to move the cursor.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sequence with every supported file under `root`.
    pub fn load(&mut self, root: &Path, settings: &LibrarySettings) {
        self.set_sequence(scan(root, settings));
    }

    /// Replace the sequence verbatim; duplicates are kept.
    pub fn set_sequence(&mut self, paths: Vec<PathBuf>) {
        self.tracks = paths;
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Path> {
        self.tracks.get(index).map(PathBuf::as_path)
    }

    /// First index holding `path`.
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.tracks.iter().map(PathBuf::as_path)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.and_then(|i| self.at(i))
    }

    /// Move the cursor; returns `false` (and leaves it alone) when out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Index that follows the cursor under `mode`.
    ///
    /// With no current track, Orderly starts at 0.
    pub fn advance<R: Rng>(&self, mode: PlayMode, rng: &mut R) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        match mode {
            PlayMode::Orderly => Some(self.current.map_or(0, |i| (i + 1) % len)),
            PlayMode::Random => Some(rng.random_range(0..len)),
        }
    }

    /// Index that precedes the cursor under `mode`.
    ///
    /// With no current track, Orderly wraps straight to the last entry.
    pub fn previous<R: Rng>(&self, mode: PlayMode, rng: &mut R) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        match mode {
            PlayMode::Orderly => Some(match self.current {
                Some(i) if i > 0 => i - 1,
                _ => len - 1,
            }),
            PlayMode::Random => Some(rng.random_range(0..len)),
        }
    }
}
