//! Filesystem enumeration of playable files.
//!
//! `scan` walks a directory tree and returns the paths of every file whose
//! extension maps to a supported [`TrackKind`], in a stable traversal order.

mod kind;
mod scan;

pub use kind::TrackKind;
pub use scan::scan;
