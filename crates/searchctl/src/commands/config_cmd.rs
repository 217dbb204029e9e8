//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

fn sorted_names(cfg: &Config) -> Vec<&String> {
    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    names
}

/// Format config for display, masking the session id.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "poll_interval_ms = {}", cfg.defaults.poll_interval_ms);

    for name in sorted_names(cfg) {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if p.session_id.is_some() {
            let _ = writeln!(out, "session_id = \"{REDACTED}\"");
        }
        if let Some(ref env) = p.session_id_env {
            let _ = writeln!(out, "session_id_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(poll) = p.poll_interval_ms {
            let _ = writeln!(out, "poll_interval_ms = {poll}");
        }
        if let Some(lenient) = p.lenient_status {
            let _ = writeln!(out, "lenient_status = {lenient}");
        }
    }

    out
}

/// Structured form of the config with the session id masked.
fn redacted_value(cfg: &Config) -> Result<serde_json::Value, CliError> {
    let mut value = serde_json::to_value(cfg).map_err(|e| CliError::Render(e.to_string()))?;
    if let Some(profiles) = value
        .get_mut("profiles")
        .and_then(serde_json::Value::as_object_mut)
    {
        for profile in profiles.values_mut() {
            if let Some(session) = profile.get_mut("session_id") {
                if !session.is_null() {
                    *session = REDACTED.into();
                }
            }
        }
    }
    Ok(value)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let names = sorted_names(cfg);
    CliError::ProfileNotFound {
        name,
        available: if names.is_empty() {
            "(none)".into()
        } else {
            names
                .into_iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        },
    }
}

// ── Init wizard ─────────────────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("searchctl configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config()?;

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Backend URL
    let server: String = Input::new()
        .with_prompt("Web backend URL")
        .default("http://localhost:8080".into())
        .validate_with(|input: &String| -> Result<(), String> {
            searchctl_config::parse_server_url(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Session id storage
    let choices = &[
        "Read from an environment variable (recommended)",
        "Save to config file (plaintext)",
        "No session",
    ];
    let selection = Select::new()
        .with_prompt("Admin session id")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let (session_id, session_id_env) = match selection {
        0 => {
            let var: String = Input::new()
                .with_prompt("Variable name")
                .default(searchctl_config::SESSION_ENV.into())
                .interact_text()
                .map_err(prompt_err)?;
            (None, Some(var))
        }
        1 => {
            let id: String = Input::new()
                .with_prompt("Session id")
                .interact_text()
                .map_err(prompt_err)?;
            if id.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "session_id".into(),
                    reason: "session id cannot be empty".into(),
                });
            }
            (Some(id.trim().to_owned()), None)
        }
        _ => (None, None),
    };

    // 4. Poll period
    let poll_interval_ms: u64 = Input::new()
        .with_prompt("Telemetry poll period (ms)")
        .default(cfg.defaults.poll_interval_ms)
        .validate_with(|ms: &u64| -> Result<(), &str> {
            if *ms == 0 {
                Err("must be greater than zero")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    let profile = Profile {
        server,
        session_id,
        session_id_env,
        poll_interval_ms: (poll_interval_ms != cfg.defaults.poll_interval_ms)
            .then_some(poll_interval_ms),
        ..Profile::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: searchctl monitor");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format_config_redacted(&cfg),
                ref structured => output::render_structured(structured, &redacted_value(&cfg)?)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: searchctl config init");
            } else {
                for name in sorted_names(&cfg) {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
