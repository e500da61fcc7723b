use std::path::PathBuf;

use super::NowPlaying;
use crate::playback::PlaybackState;
use crate::playlist::PlayMode;

/// Notifications published by the controller.
///
/// Events raised by one call arrive in the order they were raised; nothing
/// is promised across calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    PlayStateChanged(PlaybackState),
    /// A new source was selected. `index` is `None` for a file played
    /// outside the playlist.
    CurrentTrackChanged {
        index: Option<usize>,
        path: PathBuf,
    },
    MetadataChanged(Option<NowPlaying>),
    PositionChanged {
        position_ms: u64,
        duration_ms: u64,
    },
    DurationChanged(u64),
    PlayModeChanged(PlayMode),
    PlaylistChanged {
        len: usize,
    },
    VolumeChanged(f32),
}
