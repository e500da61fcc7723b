//! Library exports for the cadence player.
//!
//! The binary is a thin wrapper over [`runtime::run`]; everything else is
//! usable without a terminal.

pub mod app;
pub mod config;
pub mod controller;
pub mod library;
pub mod playback;
pub mod playlist;
pub mod runtime;
pub mod tags;
pub mod ui;

pub use controller::{ControllerEvent, NowPlaying, PlayerController};
pub use playback::{MediaEngine, PlaybackState, RodioEngine};
pub use playlist::{PlayMode, Playlist};
