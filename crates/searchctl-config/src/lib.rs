//! Shared configuration for the searchctl CLI and TUI.
//!
//! TOML profiles, session resolution (env + plaintext), and translation to
//! `searchctl_core::PanelConfig`. Both binaries depend on this crate; the
//! CLI layers its global flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use searchctl_core::{PanelConfig, TlsVerification};

/// Environment variable consulted for a session id when the profile names none.
pub const SESSION_ENV: &str = "SEARCHCTL_SESSION";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval_ms() -> u64 {
    5000
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Web backend base URL (e.g., "http://search.local:8080").
    pub server: String,

    /// Admin session id (plaintext; prefer `session_id_env`).
    pub session_id: Option<String>,

    /// Environment variable name containing the session id.
    pub session_id_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override telemetry poll period (milliseconds).
    pub poll_interval_ms: Option<u64>,

    /// Trust the envelope code on non-2xx responses.
    pub lenient_status: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "searchctl", "searchctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("searchctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Environment keys are `SEARCHCTL_`-prefixed with `__` as the nesting
/// separator, e.g. `SEARCHCTL_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SEARCHCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Name of the profile to use: explicit choice, then `default_profile`,
/// then `"default"`.
pub fn active_profile_name(explicit: Option<&str>, cfg: &Config) -> String {
    explicit
        .map(String::from)
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the session id for a profile.
///
/// Order: the profile's `session_id_env` variable, `SEARCHCTL_SESSION`,
/// then plaintext `session_id`. `None` means requests go out without a
/// session cookie.
pub fn resolve_session(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.session_id_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var(SESSION_ENV) {
        return Some(SecretString::from(val));
    }

    profile
        .session_id
        .as_ref()
        .map(|s| SecretString::from(s.clone()))
}

/// Parse and validate a backend URL.
pub fn parse_server_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http or https URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `PanelConfig` from a profile and the global defaults.
pub fn profile_to_panel_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<PanelConfig, ConfigError> {
    let url = parse_server_url(&profile.server)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let poll_interval_ms = profile.poll_interval_ms.unwrap_or(defaults.poll_interval_ms);
    if poll_interval_ms == 0 {
        return Err(ConfigError::Validation {
            field: "poll_interval_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    Ok(PanelConfig {
        url,
        session: resolve_session(profile),
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        poll_interval: Duration::from_millis(poll_interval_ms),
        lenient_status: profile.lenient_status.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.poll_interval_ms, 5000);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profile_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
default_profile = "lab"

[defaults]
timeout = 12

[profiles.lab]
server = "http://search.lab:8080"
poll_interval_ms = 2000
lenient_status = true
"#,
        );
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(active_profile_name(None, &cfg), "lab");

        let profile = &cfg.profiles["lab"];
        let panel = profile_to_panel_config(profile, &cfg.defaults).unwrap();
        assert_eq!(panel.url.as_str(), "http://search.lab:8080/");
        assert_eq!(panel.timeout, Duration::from_secs(12));
        assert_eq!(panel.poll_interval, Duration::from_millis(2000));
        assert!(panel.lenient_status);
        assert_eq!(panel.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn explicit_profile_name_wins() {
        let cfg = Config::default();
        assert_eq!(active_profile_name(Some("prod"), &cfg), "prod");
        assert_eq!(active_profile_name(None, &cfg), "default");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let profile = Profile {
            server: "http://x".into(),
            poll_interval_ms: Some(0),
            ..Profile::default()
        };
        let err = profile_to_panel_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "poll_interval_ms"));
    }

    #[test]
    fn non_http_server_is_rejected() {
        assert!(parse_server_url("ftp://x").is_err());
        assert!(parse_server_url("not a url").is_err());
        assert!(parse_server_url("https://x").is_ok());
    }

    #[test]
    fn insecure_and_ca_cert_select_tls_mode() {
        let mut profile = Profile {
            server: "https://x".into(),
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..Profile::default()
        };
        let tls = profile_to_panel_config(&profile, &Defaults::default())
            .unwrap()
            .tls;
        assert_eq!(tls, TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem")));

        profile.insecure = Some(true);
        let tls = profile_to_panel_config(&profile, &Defaults::default())
            .unwrap()
            .tls;
        assert_eq!(tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[defaults]
color = "always"
"#,
            )?;
            jail.set_env("SEARCHCTL_DEFAULTS__COLOR", "never");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.defaults.color, "never");
            Ok(())
        });
    }

    #[test]
    fn session_env_var_beats_plaintext() {
        use secrecy::ExposeSecret;

        figment::Jail::expect_with(|jail| {
            let mut profile = Profile {
                server: "http://x".into(),
                session_id: Some("from-file".into()),
                session_id_env: Some("LAB_SESSION_ID".into()),
                ..Profile::default()
            };
            jail.set_env("LAB_SESSION_ID", "from-env");

            let session = resolve_session(&profile).ok_or("no session")?;
            assert_eq!(session.expose_secret(), "from-env");

            profile.session_id_env = Some("UNSET_SESSION_VAR".into());
            let session = resolve_session(&profile).ok_or("no session")?;
            assert_eq!(session.expose_secret(), "from-file");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "http://localhost:8080".into(),
                session_id_env: Some("MY_SESSION".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let profile = &loaded.profiles["default"];
        assert_eq!(profile.server, "http://localhost:8080");
        assert_eq!(profile.session_id_env.as_deref(), Some("MY_SESSION"));
    }
}
