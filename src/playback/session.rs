use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::PlaybackState;
use super::engine::{EngineEvent, MediaEngine};
use super::scrub::to_position_ms;

/// What changed during a [`PlaybackSession::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    StateChanged(PlaybackState),
    EndOfMedia,
}

/// Live wrapper around a [`MediaEngine`].
///
/// The session is the only writer of transport state, position and duration.
/// Callers read them back through accessors; engine notifications reach
/// them only through [`poll`](Self::poll).
pub struct PlaybackSession<E: MediaEngine> {
    engine: E,
    source: Option<PathBuf>,
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
    volume: f32,
    // The engine drops its buffer on stop/end of media; the next play must reload.
    needs_reload: bool,
}

impl<E: MediaEngine> PlaybackSession<E> {
    pub fn new(mut engine: E, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        engine.set_volume(volume);
        Self {
            engine,
            source: None,
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms: 0,
            volume,
            needs_reload: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// 0 until the engine reports a real duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Load `path` as the current source, leaving the session Stopped.
    ///
    /// Returns `false` when the engine rejects the file; the session then has
    /// no source and the engine is told to stop whatever it was playing.
    /// There is no retry.
    pub fn load_source(&mut self, path: &Path) -> bool {
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
        self.duration_ms = 0;
        self.needs_reload = false;

        match self.engine.load_source(path) {
            Ok(()) => {
                debug!("loaded {}", path.display());
                self.source = Some(path.to_path_buf());
                true
            }
            Err(e) => {
                warn!("load failed: {e}");
                self.engine.stop();
                self.source = None;
                false
            }
        }
    }

    /// Start or resume playback. Without a source this does nothing.
    pub fn play(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.needs_reload && !self.load_source(&path) {
            return;
        }
        self.engine.play();
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.engine.pause();
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and rewind. The source is kept, so `play` starts it over.
    pub fn stop(&mut self) {
        if self.source.is_none() {
            self.state = PlaybackState::Stopped;
            return;
        }
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
        self.needs_reload = true;
    }

    /// Seek to `position_ms`, clamped to the duration.
    ///
    /// Dropped while the duration is unknown.
    pub fn seek(&mut self, position_ms: u64) {
        if self.duration_ms == 0 {
            debug!("seek to {position_ms}ms dropped: duration unknown");
            return;
        }
        if self.needs_reload {
            // Nothing is buffered after a stop or end of media.
            return;
        }
        let target = position_ms.min(self.duration_ms);
        self.engine.seek(target);
        self.position_ms = target;
    }

    /// Seek by a 0..=1000 scrubber value.
    pub fn seek_normalized(&mut self, value: u32) {
        if let Some(ms) = to_position_ms(value, self.duration_ms) {
            self.seek(ms);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.engine.set_volume(self.volume);
    }

    /// Drain pending engine notifications and fold them into the session.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Some(event) = self.engine.try_recv_event() {
            if self.source.is_none() {
                debug!("dropping {event:?}: nothing loaded");
                continue;
            }
            match event {
                EngineEvent::DurationChanged(ms) => {
                    self.duration_ms = ms;
                    out.push(SessionEvent::DurationChanged(ms));
                }
                EngineEvent::PositionChanged(ms) => {
                    let ms = if self.duration_ms > 0 {
                        ms.min(self.duration_ms)
                    } else {
                        ms
                    };
                    self.position_ms = ms;
                    out.push(SessionEvent::PositionChanged(ms));
                }
                EngineEvent::EndOfMedia => {
                    self.state = PlaybackState::Stopped;
                    self.needs_reload = true;
                    out.push(SessionEvent::StateChanged(PlaybackState::Stopped));
                    out.push(SessionEvent::EndOfMedia);
                }
            }
        }
        out
    }
}
