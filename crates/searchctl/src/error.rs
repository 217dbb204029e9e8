//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use searchctl_config::ConfigError;
use searchctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(searchctl::connection_failed),
        help(
            "Check that the web backend is running and reachable.\n\
             URL: {url}\n\
             Try: searchctl monitor --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Backend answered HTTP {status}")]
    #[diagnostic(
        code(searchctl::http_status),
        help(
            "Some backends report success with a non-2xx status.\n\
             Set lenient_status = true in your profile to judge responses by their code."
        )
    )]
    HttpStatus { status: u16 },

    #[error("Request timed out")]
    #[diagnostic(
        code(searchctl::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Backend rejected the request (code {code})")]
    #[diagnostic(
        code(searchctl::rejected),
        help("Check that your session id is valid; run with -v for the backend's reason.")
    )]
    Rejected { code: i64 },

    #[error("{message}")]
    #[diagnostic(
        code(searchctl::action_failed),
        help("The backend's reason is logged at warn level above.")
    )]
    ActionFailed { message: &'static str },

    #[error("Invalid response from backend: {message}")]
    #[diagnostic(code(searchctl::invalid_response))]
    InvalidResponse { message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(searchctl::not_found),
        help("Run: searchctl {list_command} to see the current entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(searchctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(searchctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: searchctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(searchctl::no_config),
        help(
            "Create a profile with: searchctl config init\n\
             Or pass --server / set SEARCHCTL_SERVER.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(searchctl::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(searchctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(searchctl::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::HttpStatus { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Rejected { .. } | Self::ActionFailed { .. } => exit_code::REJECTED,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::InvalidResponse { .. } | Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::HttpStatus { status } => CliError::HttpStatus { status },
            CoreError::Rejected { code, message } => {
                if let Some(message) = message {
                    tracing::warn!(code, %message, "backend rejected request");
                }
                CliError::Rejected { code }
            }
            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },
            CoreError::Config { message } => CliError::Validation {
                field: "connection".into(),
                reason: message,
            },
        }
    }
}
