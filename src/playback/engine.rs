use std::path::{Path, PathBuf};

use thiserror::Error;

/// Notifications raised by a media engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Total length of the loaded source became known (milliseconds).
    DurationChanged(u64),
    /// Playback position moved (milliseconds).
    PositionChanged(u64),
    /// The loaded source played to its end.
    EndOfMedia,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("audio thread is gone")]
    Disconnected,
}

/// The decode/output backend a [`PlaybackSession`](super::PlaybackSession) wraps.
///
/// Commands are fire-and-forget except `load_source`, which reports a file
/// that cannot be opened or decoded. Events are drained by the caller with
/// `try_recv_event`; an engine must not deliver events that belong to a
/// source replaced by a later `load_source`, including one that failed.
pub trait MediaEngine {
    fn load_source(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position_ms: u64);
    fn set_volume(&mut self, volume: f32);
    fn try_recv_event(&mut self) -> Option<EngineEvent>;
}
