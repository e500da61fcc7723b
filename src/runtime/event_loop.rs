use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::controller::{ControllerEvent, PlayerController};
use crate::playback::{MediaEngine, PlaybackState, SCRUB_MAX};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: pumps the engine, mirrors controller events
/// into `app`, draws and handles input. Returns `Ok(())` on quit.
pub fn run<E: MediaEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<E>,
    events: &Receiver<ControllerEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        controller.process_engine_events();
        drain_events(app, events);

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller.playlist(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply every pending controller notification to `app`.
pub fn drain_events(app: &mut App, events: &Receiver<ControllerEvent>) {
    for event in events.try_iter() {
        app.apply(&event);
    }
}

/// Map one key press to controller calls. Returns `true` on quit.
pub fn handle_key_event<E: MediaEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<E>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.follow_playback_off();
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                app.follow_playback_on();
                controller.play_at(app.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.follow_playback_on();
            // Nothing loaded yet: start from the selection.
            if controller.state() == PlaybackState::Stopped && controller.current_path().is_none()
            {
                if app.has_tracks() {
                    controller.play_at(app.selected);
                }
            } else {
                controller.toggle();
            }
        }
        KeyCode::Char('l') => {
            app.follow_playback_on();
            controller.advance();
        }
        KeyCode::Char('h') => {
            app.follow_playback_on();
            controller.previous();
        }
        KeyCode::Char('L') => {
            let step = settings.controls.scrub_seconds.saturating_mul(1000);
            controller.seek(controller.position_ms().saturating_add(step));
        }
        KeyCode::Char('H') => {
            let step = settings.controls.scrub_seconds.saturating_mul(1000);
            controller.seek(controller.position_ms().saturating_sub(step));
        }
        KeyCode::Char(c @ '0'..='9') => {
            // 0 jumps to the start, 9 to 90%.
            let tenth = c.to_digit(10).unwrap_or(0);
            controller.seek_normalized(tenth * SCRUB_MAX / 10);
        }
        KeyCode::Char('m') => controller.toggle_play_mode(),
        KeyCode::Char('s') => controller.stop(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            controller.set_volume(controller.volume() + settings.controls.volume_step);
        }
        KeyCode::Char('-') => {
            controller.set_volume(controller.volume() - settings.controls.volume_step);
        }
        KeyCode::Char('K') => app.toggle_metadata_window(),
        other => debug!("unbound key {other:?}"),
    }

    false
}
