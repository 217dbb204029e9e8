//! `searchctl-tui`: terminal panel for a search engine's web backend.
//!
//! Built on [ratatui](https://ratatui.rs). Four tabs, switched with the
//! number keys: Crawlers and Indexers show live telemetry from the
//! [`Poller`](searchctl_core::Poller); Domains and Keywords drive the admin
//! forms and the two managed lists.
//!
//! Logs are written to a file (default `/tmp/searchctl-tui.log`) so they
//! never land on the terminal the panel is drawing to.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod telemetry_bridge;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use searchctl_config::{Config, Profile};
use searchctl_core::PanelConfig;

use crate::app::App;

/// Terminal panel for crawler/indexer telemetry and crawl-list management.
#[derive(Parser, Debug)]
#[command(name = "searchctl-tui", version, about)]
struct Cli {
    /// Profile from the searchctl config file
    #[arg(short, long, env = "SEARCHCTL_PROFILE")]
    profile: Option<String>,

    /// Web backend URL, overriding the profile (e.g. http://localhost:8080)
    #[arg(short, long, env = "SEARCHCTL_SERVER")]
    server: Option<String>,

    /// Admin session id sent as the `sessionID` cookie
    #[arg(long, env = "SEARCHCTL_SESSION", hide_env_values = true)]
    session: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/searchctl-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. The returned guard flushes the writer on drop and
/// must outlive the app.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "searchctl_tui={log_level},searchctl_core={log_level},searchctl_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("searchctl-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the backend from flags and the shared config file.
///
/// `--server` wins over the profile's URL and `--session` over its stored
/// session; without either a profile or `--server` there is nothing to
/// connect to.
fn build_panel_config(cli: &Cli, cfg: &Config) -> Result<PanelConfig> {
    let name = searchctl_config::active_profile_name(cli.profile.as_deref(), cfg);

    let profile = match (cfg.profiles.get(&name), &cli.server) {
        (Some(profile), _) => profile.clone(),
        (None, Some(server)) => Profile {
            server: server.clone(),
            ..Profile::default()
        },
        (None, None) if cli.profile.is_some() => {
            return Err(eyre!("profile '{name}' not found in the config file"));
        }
        (None, None) => {
            return Err(eyre!(
                "no backend configured; pass --server or run `searchctl config init`"
            ));
        }
    };

    let mut panel = searchctl_config::profile_to_panel_config(&profile, &cfg.defaults)
        .wrap_err_with(|| format!("invalid profile '{name}'"))?;
    if let Some(ref server) = cli.server {
        panel.url = searchctl_config::parse_server_url(server)?;
    }
    if let Some(ref session) = cli.session {
        panel.session = Some(SecretString::from(session.clone()));
    }
    Ok(panel)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = searchctl_config::load_config().wrap_err("failed to load config")?;
    let panel = build_panel_config(&cli, &cfg)?;
    info!(url = %panel.url, poll_ms = panel.poll_interval.as_millis(), "starting searchctl-tui");

    let client = panel.connect()?;
    let mut app = App::new(client, panel.poll_interval);
    app.run().await?;

    Ok(())
}
