//! Where settings come from: an optional TOML file, with `CADENCE__*`
//! environment variables layered on top.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::Settings;

const ENV_PREFIX: &str = "CADENCE";
const PATH_OVERRIDE: &str = "CADENCE_CONFIG_PATH";

/// A loaded value the player cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidSetting {
    #[error("playback.volume {0} is outside 0.0..=1.0")]
    Volume(f32),
    #[error("playback.tick_ms must be at least 1")]
    ZeroTick,
    #[error("controls.volume_step {0} is outside (0.0, 1.0]")]
    VolumeStep(f32),
}

impl Settings {
    /// Load from the resolved config file (if any), then the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(config_path(|key| env::var_os(key)).as_deref())
    }

    /// Like [`load`](Self::load) with an explicit file. A missing file is
    /// not an error; every field has a default.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(InvalidSetting::Volume(volume));
        }
        if self.playback.tick_ms == 0 {
            return Err(InvalidSetting::ZeroTick);
        }
        let step = self.controls.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(InvalidSetting::VolumeStep(step));
        }
        Ok(())
    }
}

/// `CADENCE_CONFIG_PATH` when set, otherwise `cadence/config.toml` under
/// `XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
///
/// `var` looks up one environment variable.
pub(super) fn config_path(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(explicit) = var(PATH_OVERRIDE) {
        return Some(explicit.into());
    }
    var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| Path::new(&home).join(".config")))
        .map(|base| base.join("cadence").join("config.toml"))
}
