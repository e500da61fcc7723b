use super::load::{InvalidSetting, config_path};
use super::schema::*;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock and puts every touched variable back on drop.
struct ScopedEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    fn new() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
        }
    }

    fn save(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, std::env::var_os(key)));
        }
    }

    fn set(&mut self, key: &'static str, val: impl AsRef<OsStr>) -> &mut Self {
        self.save(key);
        unsafe { std::env::set_var(key, val) };
        self
    }

    fn unset(&mut self, key: &'static str) -> &mut Self {
        self.save(key);
        unsafe { std::env::remove_var(key) };
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, old) in self.saved.drain(..).rev() {
            match old {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
    let vars: HashMap<String, OsString> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), OsString::from(v)))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn explicit_config_path_beats_xdg_and_home() {
    let path = config_path(lookup(&[
        ("CADENCE_CONFIG_PATH", "/etc/cadence.toml"),
        ("XDG_CONFIG_HOME", "/xdg"),
        ("HOME", "/home/me"),
    ]));
    assert_eq!(path, Some(PathBuf::from("/etc/cadence.toml")));
}

#[test]
fn config_path_under_xdg_then_home() {
    assert_eq!(
        config_path(lookup(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/me")])),
        Some(PathBuf::from("/xdg/cadence/config.toml"))
    );
    assert_eq!(
        config_path(lookup(&[("HOME", "/home/me")])),
        Some(PathBuf::from("/home/me/.config/cadence/config.toml"))
    );
    assert_eq!(config_path(lookup(&[])), None);
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert_eq!(s.playback.mode, PlayModeSetting::Orderly);
    assert!((s.playback.volume - 0.7).abs() < f32::EPSILON);
    assert!(s.library.recursive);
    assert!(s.library.root.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_mode_aliases() {
    let mut env = ScopedEnv::new();
    env.unset("CADENCE__PLAYBACK__VOLUME")
        .unset("CADENCE__PLAYBACK__MODE");

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
mode = "shuffle"
volume = 0.5
tick_ms = 100

[library]
root = "/srv/music"
recursive = false
include_hidden = false
follow_links = false
max_depth = 3

[controls]
scrub_seconds = 9
volume_step = 0.1

[ui]
follow_playback = false
header_text = "hello"

[logging]
level = "debug"
file = "/tmp/cadence-test.log"
"#,
    )
    .unwrap();

    let s = Settings::load_from(Some(cfg_path.as_path())).unwrap();
    assert_eq!(s.playback.mode, PlayModeSetting::Random);
    assert!((s.playback.volume - 0.5).abs() < f32::EPSILON);
    assert_eq!(s.playback.tick_ms, 100);
    assert_eq!(s.library.root, Some(std::path::PathBuf::from("/srv/music")));
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.controls.scrub_seconds, 9);
    assert!(!s.ui.follow_playback);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/cadence-test.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let mut env = ScopedEnv::new();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
scrub_seconds = 30
"#,
    )
    .unwrap();

    env.set("CADENCE_CONFIG_PATH", &cfg_path)
        .set("CADENCE__CONTROLS__SCRUB_SECONDS", "2");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.scrub_seconds, 2);
}

#[test]
fn missing_config_file_gives_defaults() {
    let mut env = ScopedEnv::new();
    env.unset("CADENCE__PLAYBACK__MODE");

    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(s.playback.mode, PlayModeSetting::Orderly);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert_eq!(s.validate(), Err(InvalidSetting::Volume(1.5)));

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert_eq!(s.validate(), Err(InvalidSetting::ZeroTick));

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert_eq!(s.validate(), Err(InvalidSetting::VolumeStep(0.0)));
    assert_eq!(
        s.validate().unwrap_err().to_string(),
        "controls.volume_step 0 is outside (0.0, 1.0]"
    );
}
