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
fn resolve_config_path_prefers_tacet_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TACET_CONFIG_PATH", "/tmp/tacet-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tacet-test-config.toml")
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
            .join("tacet")
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
            .join("tacet")
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
[ui]
header_text = "hello"
toast_ms = 1500

[library]
roots = ["/music/a", "/music/b"]
extensions = ["mp3", "flac"]
follow_links = false
display_fields = ["title", "duration"]
display_separator = "::"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TACET_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TACET__UI__TOAST_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.toast_ms, 1500);
    assert_eq!(s.library.roots, vec!["/music/a", "/music/b"]);
    assert_eq!(
        s.library.extensions,
        vec!["mp3".to_string(), "flac".to_string()]
    );
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_fields.len(), 2);
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Title));
    assert!(matches!(
        s.library.display_fields[1],
        TrackDisplayField::Duration
    ));
    assert_eq!(s.library.display_separator, "::");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
toast_ms = 2500
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TACET_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TACET__UI__TOAST_MS", "100");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.toast_ms, 100);
}

#[test]
fn validate_rejects_empty_extension_list() {
    let mut s = Settings::default();
    s.library.extensions = vec!["  ".into()];
    assert!(s.validate().is_err());

    s.library.extensions = vec!["mp3".into()];
    assert!(s.validate().is_ok());
}
