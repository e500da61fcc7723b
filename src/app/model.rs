//! Application model: the UI's copy of player state.
//!
//! `App` is fed exclusively by [`ControllerEvent`]s (see [`App::apply`]) and
//! adds the state that only the UI cares about: the selection cursor,
//! follow-playback and the metadata popup.

use std::path::PathBuf;

use crate::controller::{ControllerEvent, NowPlaying};
use crate::playback::{PlaybackState, format_time_text, to_scrub_value};
use crate::playlist::PlayMode;

/// The main application model.
#[derive(Debug, Clone)]
pub struct App {
    pub selected: usize,
    pub playlist_len: usize,
    pub follow_playback: bool,

    pub playback: PlaybackState,
    pub current_index: Option<usize>,
    pub current_path: Option<PathBuf>,
    pub now_playing: Option<NowPlaying>,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub mode: PlayMode,
    pub volume: f32,

    pub current_dir: Option<String>,
    pub metadata_window: bool,
}

impl App {
    /// Create an empty model; the playlist arrives through events.
    pub fn new(mode: PlayMode, volume: f32) -> Self {
        Self {
            selected: 0,
            playlist_len: 0,
            follow_playback: true,

            playback: PlaybackState::Stopped,
            current_index: None,
            current_path: None,
            now_playing: None,
            position_ms: 0,
            duration_ms: 0,
            mode,
            volume,

            current_dir: None,
            metadata_window: false,
        }
    }

    /// Mirror one controller notification.
    pub fn apply(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::PlayStateChanged(state) => self.playback = *state,
            ControllerEvent::CurrentTrackChanged { index, path } => {
                self.current_index = *index;
                self.current_path = Some(path.clone());
                self.position_ms = 0;
                self.duration_ms = 0;
                if let Some(i) = index.filter(|_| self.follow_playback) {
                    self.set_selected(i);
                }
            }
            ControllerEvent::MetadataChanged(now_playing) => {
                self.now_playing = now_playing.clone();
            }
            ControllerEvent::PositionChanged {
                position_ms,
                duration_ms,
            } => {
                self.position_ms = *position_ms;
                self.duration_ms = *duration_ms;
            }
            ControllerEvent::DurationChanged(ms) => self.duration_ms = *ms,
            ControllerEvent::PlayModeChanged(mode) => self.mode = *mode,
            ControllerEvent::PlaylistChanged { len } => {
                self.playlist_len = *len;
                self.current_index = None;
                self.selected = 0;
            }
            ControllerEvent::VolumeChanged(volume) => self.volume = *volume,
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }
    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }
    /// Record the directory the playlist was loaded from.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn has_tracks(&self) -> bool {
        self.playlist_len > 0
    }

    /// Set the selection, clamped to the playlist.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx.min(self.playlist_len.saturating_sub(1));
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.playlist_len;
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = match self.selected {
                0 => self.playlist_len - 1,
                i => i - 1,
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist_len.saturating_sub(1);
    }

    /// Scrubber position on the 0..=1000 scale.
    pub fn scrub_value(&self) -> u32 {
        to_scrub_value(self.position_ms, self.duration_ms)
    }

    pub fn time_text(&self) -> String {
        format_time_text(self.position_ms, self.duration_ms)
    }

    /// Label for the status line; `None` when nothing is loaded.
    pub fn now_playing_label(&self) -> Option<String> {
        self.now_playing.as_ref().map(NowPlaying::display_label)
    }
}
