//! Playback session and the media engine it drives.
//!
//! The engine does the decoding and output on its own thread; everything
//! here runs on the control thread. Engine notifications are pulled with
//! [`PlaybackSession::poll`], never pushed from another thread.

mod engine;
mod rodio_engine;
mod scrub;
mod session;

pub use engine::{EngineError, EngineEvent, MediaEngine};
pub use rodio_engine::RodioEngine;
pub use scrub::{SCRUB_MAX, format_time_text, to_position_ms, to_scrub_value};
pub use session::{PlaybackSession, SessionEvent};

/// Transport state of the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

#[cfg(test)]
pub(crate) mod fake;
