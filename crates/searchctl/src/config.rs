//! CLI configuration: thin wrapper around `searchctl_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --session, etc.).

use std::time::Duration;

use secrecy::SecretString;

use searchctl_core::{PanelConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use searchctl_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    searchctl_config::active_profile_name(global.profile.as_deref(), config)
}

/// Build a `PanelConfig` from the config file, the active profile, and
/// CLI overrides.
///
/// Flags win over the profile, which wins over `[defaults]`. Without a
/// matching profile, `--server` alone is enough to connect.
pub fn build_panel_config(global: &GlobalOpts) -> Result<PanelConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &cfg, global);
    }

    // A profile asked for by name must exist.
    if global.profile.is_some() && global.server.is_none() {
        let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
        names.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if names.is_empty() {
                "(none)".into()
            } else {
                names.join(", ")
            },
        });
    }

    let Some(server) = global.server.clone() else {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };

    let profile = Profile {
        server,
        ..Profile::default()
    };
    resolve_profile(&profile, &cfg, global)
}

/// Translate a `Profile` + global flags into a `PanelConfig`.
pub fn resolve_profile(
    profile: &Profile,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<PanelConfig, CliError> {
    let mut panel = searchctl_config::profile_to_panel_config(profile, &cfg.defaults)?;

    // 1. Server URL (flag > env > profile)
    if let Some(ref server) = global.server {
        panel.url = searchctl_config::parse_server_url(server)?;
    }

    // 2. Session (flag/env > profile)
    if let Some(ref session) = global.session {
        panel.session = Some(SecretString::from(session.clone()));
    }

    // 3. TLS verification
    if global.insecure {
        panel.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 4. Timeout
    if let Some(secs) = global.timeout {
        panel.timeout = Duration::from_secs(secs);
    }

    Ok(panel)
}
