// ── Core error types ──
//
// User-facing errors from searchctl-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<searchctl_api::Error>`
// impl translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Backend answered HTTP {status}")]
    HttpStatus { status: u16 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by backend (code {code})")]
    Rejected { code: i64, message: Option<String> },

    #[error("Invalid response from backend: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<searchctl_api::Error> for CoreError {
    fn from(err: searchctl_api::Error) -> Self {
        use searchctl_api::Error as Api;

        match err {
            Api::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            Api::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                reason: e.to_string(),
            },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            Api::Tls(message) => CoreError::Config { message },
            Api::Http { status, .. } => CoreError::HttpStatus { status },
            Api::Api { code, message } => CoreError::Rejected { code, message },
            Api::Deserialization { message, .. } => CoreError::InvalidResponse { message },
        }
    }
}
