//! Clap derive structures for the `searchctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// searchctl -- admin panel for a distributed search engine
#[derive(Debug, Parser)]
#[command(
    name = "searchctl",
    version,
    about = "Monitor and administer a distributed search engine from the command line",
    long_about = "Watch crawler and indexer health, submit domains for crawling,\n\
        and manage the domain blacklist and illegal keyword list through the\n\
        web backend's admin API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SEARCHCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Web backend URL (overrides profile)
    #[arg(long, short = 's', env = "SEARCHCTL_SERVER", global = true)]
    pub server: Option<String>,

    /// Admin session id, sent as the sessionID cookie
    #[arg(long, env = "SEARCHCTL_SESSION", global = true, hide_env = true)]
    pub session: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SEARCHCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SEARCHCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SEARCHCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show crawler and indexer node telemetry
    #[command(alias = "mon", alias = "m")]
    Monitor(MonitorArgs),

    /// Submit domains for crawling
    Include(IncludeArgs),

    /// Manage the crawl domain blacklist
    #[command(alias = "bl")]
    Blacklist(BlacklistArgs),

    /// Manage illegal keywords
    #[command(alias = "kw")]
    Keywords(KeywordsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Monitor ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MonitorTarget {
    /// Crawler fleet only
    Crawler,
    /// Indexer fleet only
    Indexer,
    /// Both fleets
    All,
}

#[derive(Debug, Args)]
pub struct MonitorArgs {
    /// Fleet to show
    #[arg(value_enum, default_value = "all")]
    pub target: MonitorTarget,

    /// Keep polling and redraw on every refresh until Ctrl-C
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Poll period in milliseconds when watching (overrides profile)
    #[arg(long, short = 'i', requires = "watch")]
    pub interval: Option<u64>,
}

// ── Include ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct IncludeArgs {
    /// Domains to submit; several may be given or joined with '|'
    #[arg(required = true, num_args = 1..)]
    pub domains: Vec<String>,
}

// ── Blacklist ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BlacklistArgs {
    #[command(subcommand)]
    pub command: BlacklistCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlacklistCommand {
    /// List blacklisted domains
    #[command(alias = "ls")]
    List,

    /// Add a domain to the blacklist
    Add {
        /// Domain to blacklist
        domain: String,
    },

    /// Remove a domain from the blacklist
    #[command(alias = "rm")]
    Remove {
        /// Domain to remove
        domain: String,
    },
}

// ── Keywords ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KeywordsArgs {
    #[command(subcommand)]
    pub command: KeywordsCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeywordsCommand {
    /// List illegal keywords
    #[command(alias = "ls")]
    List,

    /// Add an illegal keyword
    Add {
        /// Keyword to add
        keyword: String,
    },

    /// Remove an illegal keyword
    #[command(alias = "rm")]
    Remove {
        /// Keyword to remove
        keyword: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
