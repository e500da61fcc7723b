//! Playback controller: the single entry point for user intents.
//!
//! It owns the playlist and the playback session, decides what plays next,
//! extracts tags for whatever gets loaded, and publishes every observable
//! change as a [`ControllerEvent`] on an mpsc channel. Engine notifications
//! are pumped from the control thread with
//! [`PlayerController::process_engine_events`].

mod events;
mod now_playing;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{LibrarySettings, PlaybackSettings};
use crate::playback::{
    MediaEngine, PlaybackSession, PlaybackState, SessionEvent, format_time_text, to_scrub_value,
};
use crate::playlist::{PlayMode, Playlist};
use crate::tags;

pub use events::ControllerEvent;
pub use now_playing::{CoverArt, NowPlaying};

pub struct PlayerController<E: MediaEngine> {
    playlist: Playlist,
    session: PlaybackSession<E>,
    mode: PlayMode,
    now_playing: Option<NowPlaying>,
    loads: u64,
    rng: StdRng,
    events: Sender<ControllerEvent>,
}

impl<E: MediaEngine> PlayerController<E> {
    /// Build a controller around `engine`. The returned receiver gets every
    /// [`ControllerEvent`]; dropping it just silences them.
    pub fn new(engine: E, settings: &PlaybackSettings) -> (Self, Receiver<ControllerEvent>) {
        let (tx, rx) = mpsc::channel();
        let controller = Self {
            playlist: Playlist::new(),
            session: PlaybackSession::new(engine, settings.volume),
            mode: settings.mode.into(),
            now_playing: None,
            loads: 0,
            rng: StdRng::from_os_rng(),
            events: tx,
        };
        (controller, rx)
    }

    fn emit(&self, event: ControllerEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    fn emit_state_if_changed(&self, before: PlaybackState) {
        let now = self.session.state();
        if now != before {
            self.emit(ControllerEvent::PlayStateChanged(now));
        }
    }

    // ---- playlist ----

    /// Replace the playlist with the supported files under `root`.
    pub fn load_directory(&mut self, root: &Path, settings: &LibrarySettings) {
        self.playlist.load(root, settings);
        info!("{} tracks from {}", self.playlist.len(), root.display());
        self.emit(ControllerEvent::PlaylistChanged {
            len: self.playlist.len(),
        });
    }

    pub fn set_playlist(&mut self, paths: Vec<PathBuf>) {
        self.playlist.set_sequence(paths);
        self.emit(ControllerEvent::PlaylistChanged {
            len: self.playlist.len(),
        });
    }

    // ---- transport ----

    /// Load and play the playlist entry at `index`. Out of range does nothing.
    ///
    /// A file the engine cannot open leaves the session stopped on that
    /// entry; nothing skips ahead.
    pub fn play_at(&mut self, index: usize) {
        let Some(path) = self.playlist.at(index).map(Path::to_path_buf) else {
            debug!("play_at({index}) ignored: {} tracks", self.playlist.len());
            return;
        };
        self.playlist.set_current(index);
        self.emit(ControllerEvent::CurrentTrackChanged {
            index: Some(index),
            path: path.clone(),
        });
        self.start(&path);
    }

    /// Play `path`, through its playlist entry when it has one.
    ///
    /// A path outside the playlist plays on its own and the cursor stays put.
    pub fn play_file(&mut self, path: &Path) {
        if let Some(index) = self.playlist.index_of(path) {
            self.play_at(index);
            return;
        }
        self.emit(ControllerEvent::CurrentTrackChanged {
            index: None,
            path: path.to_path_buf(),
        });
        self.start(path);
    }

    /// Every load announces its resulting state, even Playing to Playing.
    fn start(&mut self, path: &Path) {
        if self.session.load_source(path) {
            self.session.play();
        }
        self.publish_now_playing(path);
        self.emit(ControllerEvent::PlayStateChanged(self.session.state()));
    }

    fn publish_now_playing(&mut self, path: &Path) {
        let mut metadata = tags::extract(path);
        self.loads += 1;
        let cover = metadata.cover.take().map(|cover| CoverArt {
            id: self.loads,
            cover: Arc::new(cover),
        });
        let now_playing = NowPlaying {
            path: path.to_path_buf(),
            metadata,
            cover,
        };
        info!("now playing: {}", now_playing.display_label());
        self.now_playing = Some(now_playing.clone());
        self.emit(ControllerEvent::MetadataChanged(Some(now_playing)));
    }

    pub fn advance(&mut self) {
        if let Some(index) = self.playlist.advance(self.mode, &mut self.rng) {
            self.play_at(index);
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.playlist.previous(self.mode, &mut self.rng) {
            self.play_at(index);
        }
    }

    /// Pause when playing, otherwise play (resume, or restart after a stop).
    ///
    /// A restart after `stop` publishes the track's metadata again.
    pub fn toggle(&mut self) {
        let before = self.session.state();
        match before {
            PlaybackState::Playing => self.session.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.session.play();
                if self.now_playing.is_none() {
                    if let Some(path) = self.session.source().map(Path::to_path_buf) {
                        self.publish_now_playing(&path);
                    }
                }
            }
        }
        self.emit_state_if_changed(before);
    }

    /// Stop and rewind. The cursor stays, the metadata is dropped.
    pub fn stop(&mut self) {
        let before = self.session.state();
        self.session.stop();
        self.emit_state_if_changed(before);
        self.emit_position();
        if self.now_playing.take().is_some() {
            self.emit(ControllerEvent::MetadataChanged(None));
        }
    }

    pub fn seek(&mut self, position_ms: u64) {
        let before = self.session.position_ms();
        self.session.seek(position_ms);
        if self.session.position_ms() != before {
            self.emit_position();
        }
    }

    /// Seek with a 0..=1000 scrubber value.
    pub fn seek_normalized(&mut self, value: u32) {
        let before = self.session.position_ms();
        self.session.seek_normalized(value);
        if self.session.position_ms() != before {
            self.emit_position();
        }
    }

    fn emit_position(&self) {
        self.emit(ControllerEvent::PositionChanged {
            position_ms: self.session.position_ms(),
            duration_ms: self.session.duration_ms(),
        });
    }

    // ---- settings ----

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        info!("play mode: {}", mode.label());
        self.emit(ControllerEvent::PlayModeChanged(mode));
    }

    pub fn toggle_play_mode(&mut self) {
        self.set_play_mode(self.mode.toggled());
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.session.set_volume(volume);
        self.emit(ControllerEvent::VolumeChanged(self.session.volume()));
    }

    // ---- engine pump ----

    /// Fold pending engine notifications into events.
    ///
    /// End of media moves on to the next track under the current play mode.
    pub fn process_engine_events(&mut self) {
        let mut finished = false;
        for event in self.session.poll() {
            match event {
                SessionEvent::PositionChanged(position_ms) => {
                    self.emit(ControllerEvent::PositionChanged {
                        position_ms,
                        duration_ms: self.session.duration_ms(),
                    })
                }
                SessionEvent::DurationChanged(ms) => {
                    self.emit(ControllerEvent::DurationChanged(ms))
                }
                SessionEvent::StateChanged(state) => {
                    self.emit(ControllerEvent::PlayStateChanged(state))
                }
                SessionEvent::EndOfMedia => finished = true,
            }
        }
        if finished {
            debug!("end of media; advancing");
            self.advance();
        }
    }

    // ---- read access ----

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn position_ms(&self) -> u64 {
        self.session.position_ms()
    }

    pub fn duration_ms(&self) -> u64 {
        self.session.duration_ms()
    }

    pub fn scrub_value(&self) -> u32 {
        to_scrub_value(self.session.position_ms(), self.session.duration_ms())
    }

    pub fn time_text(&self) -> String {
        format_time_text(self.session.position_ms(), self.session.duration_ms())
    }

    pub fn play_mode(&self) -> PlayMode {
        self.mode
    }

    pub fn current_index(&self) -> Option<usize> {
        self.playlist.current_index()
    }

    /// Path of the loaded source, which may sit outside the playlist.
    pub fn current_path(&self) -> Option<&Path> {
        self.session.source()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn volume(&self) -> f32 {
        self.session.volume()
    }

    #[cfg(test)]
    pub(crate) fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
