use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::LibrarySettings;
use crate::controller::PlayerController;
use crate::playback::RodioEngine;

mod event_loop;
mod logging;
mod settings;

/// What to open: the first CLI argument, else `library.root`, else the
/// current directory.
fn resolve_root(arg: Option<String>, library: &LibrarySettings) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| library.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Split a target into the directory to scan and a file to start with.
fn split_target(target: PathBuf) -> (PathBuf, Option<PathBuf>) {
    if !target.is_file() {
        return (target, None);
    }
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, Some(target))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    if let Some(path) = logging::init(&settings.logging) {
        info!("logging to {}", path.display());
    }

    let (dir, start_file) = split_target(resolve_root(env::args().nth(1), &settings.library));

    let engine = RodioEngine::new(
        Duration::from_millis(settings.playback.tick_ms),
        settings.playback.volume,
    )?;
    let (mut controller, events) = PlayerController::new(engine, &settings.playback);

    let mut app = App::new(controller.play_mode(), controller.volume());
    app.follow_playback = settings.ui.follow_playback;
    app.set_current_dir(dir.display().to_string());

    controller.load_directory(&dir, &settings.library);
    if let Some(file) = start_file {
        controller.play_file(&file);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &events,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
