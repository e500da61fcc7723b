//! Metadata extraction from container tags.
//!
//! [`extract`] never fails: a file that cannot be opened, parsed, or that
//! simply carries no tag yields [`TrackMetadata::default`] (or whatever
//! subset could be read). MPEG and FLAC store their text and artwork in
//! unrelated structures, so each has its own strategy module.

mod flac;
mod model;
mod mpeg;

use std::path::Path;

use crate::library::TrackKind;

pub use model::{Cover, TrackMetadata};

/// Read title, artist, album and the first embedded picture from `path`.
///
/// Files whose extension is not a supported kind are not opened at all.
pub fn extract(path: &Path) -> TrackMetadata {
    match TrackKind::from_path(path) {
        Some(TrackKind::Mpeg) => mpeg::extract(path),
        Some(TrackKind::Flac) => flac::extract(path),
        None => TrackMetadata::default(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures;
