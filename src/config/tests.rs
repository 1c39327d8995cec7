use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_boombox_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BOOMBOX_CONFIG_PATH", "/tmp/boombox-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/boombox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("boombox")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("boombox")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat = true

[equalizer]
bass_db = 6.0
mid_db = -3.0
treble_db = 1.5

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false

[sentinel]
title = "Fallback"
source = "assets/fallback.mp3"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BOOMBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BOOMBOX__EQUALIZER__BASS_DB");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat);
    assert_eq!(s.equalizer.bass_db, 6.0);
    assert_eq!(s.equalizer.mid_db, -3.0);
    assert_eq!(s.equalizer.treble_db, 1.5);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert_eq!(s.sentinel.title, "Fallback");
    assert_eq!(s.sentinel.source, "assets/fallback.mp3");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[equalizer]
bass_db = 6.0
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BOOMBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("BOOMBOX__EQUALIZER__BASS_DB", "-2.0");

    let s = Settings::load().unwrap();
    assert_eq!(s.equalizer.bass_db, -2.0);
}

#[test]
fn validate_rejects_out_of_range_equalizer_defaults() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.equalizer.treble_db = 13.0;
    assert!(s.validate().is_err());

    s.equalizer.treble_db = -12.0;
    assert!(s.validate().is_ok());

    s.sentinel.source = "  ".into();
    assert!(s.validate().is_err());
}
