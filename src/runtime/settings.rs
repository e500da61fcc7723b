use crate::config;

/// Load settings, falling back to defaults on any problem.
///
/// This runs before the logger exists (the log file location is itself a
/// setting), so problems go to stderr while the terminal is still ours.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(e) = s.validate() {
                eprintln!("cadence: invalid config, using defaults: {e}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("cadence: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
