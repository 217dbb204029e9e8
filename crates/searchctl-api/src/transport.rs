// Shared transport configuration for building reqwest::Client instances.
//
// TLS, timeout, session cookie, and status-handling settings live here so
// the admin client only deals with URLs and envelopes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Name of the cookie the admin backend reads the session from.
pub const SESSION_COOKIE: &str = "sessionID";

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed deployments).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Session id sent as the `sessionID` cookie on every request.
    pub session: Option<SecretString>,
    /// Judge non-2xx responses by their envelope code when the body parses.
    ///
    /// The stock backend writes most successful envelopes with HTTP 500.
    pub lenient_status: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            session: None,
            lenient_status: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` for the given server base URL.
    ///
    /// When a session is configured it is seeded into a cookie jar scoped
    /// to `base_url`.
    pub fn build_client(&self, base_url: &Url) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("searchctl/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref session) = self.session {
            let jar = Jar::default();
            jar.add_cookie_str(
                &format!("{SESSION_COOKIE}={}; Path=/", session.expose_secret()),
                base_url,
            );
            builder = builder.cookie_provider(Arc::new(jar));
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    pub fn with_session(mut self, session: SecretString) -> Self {
        self.session = Some(session);
        self
    }
}
