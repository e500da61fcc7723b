use std::fs::OpenOptions;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::config::LoggingSettings;

/// Where log records go when `logging.file` is unset.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("cadence.log")
}

/// Install `env_logger`, appending to the configured log file.
///
/// The terminal belongs to the UI, so nothing is written to stderr once the
/// logger is up. `RUST_LOG` overrides `logging.level`. If the file cannot be
/// opened, logging stays off and the player still starts.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().unwrap_or_else(default_log_path);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("cadence: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(settings.level.as_str()));
    builder.target(Target::Pipe(Box::new(file)));
    if let Err(e) = builder.try_init() {
        eprintln!("cadence: logger already installed: {e}");
        return None;
    }
    Some(path)
}
