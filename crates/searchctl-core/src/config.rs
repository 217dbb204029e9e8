// ── Runtime connection configuration ──
//
// Describes how to reach the search engine's web backend and how often to
// poll it. The CLI/TUI builds a `PanelConfig` from its own config sources
// and hands it in; core never reads config files.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use searchctl_api::{AdminClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Telemetry poll period used when nothing else is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one backend.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Backend base URL (e.g., `http://search.local:8080`).
    pub url: Url,
    /// Session id for the admin endpoints, if the backend requires one.
    pub session: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Period between telemetry polls.
    pub poll_interval: Duration,
    /// Judge non-2xx responses by their envelope code.
    pub lenient_status: bool,
}

impl PanelConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            session: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
            lenient_status: false,
        }
    }

    fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            session: self.session.clone(),
            lenient_status: self.lenient_status,
        }
    }

    /// Build the shared admin client for this backend.
    pub fn connect(&self) -> Result<Arc<AdminClient>, CoreError> {
        let client = AdminClient::new(self.url.clone(), &self.transport())?;
        Ok(Arc::new(client))
    }
}
