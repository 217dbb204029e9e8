// Admin API HTTP client
//
// Wraps `reqwest::Client` with admin URL construction and `{code, msg, data}`
// envelope unwrapping. Endpoint groups (monitoring, lists) are implemented
// as inherent methods in sibling modules so this file stays focused on
// transport mechanics.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::admin::models::Envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error values.
const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the backend's admin API.
///
/// Every response body is read as text and decoded as an envelope,
/// whatever its content type. Methods return the unwrapped `data`
/// payload; the envelope is stripped before the caller sees it.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
    lenient_status: bool,
}

impl AdminClient {
    /// Create a new admin client from a `TransportConfig`.
    ///
    /// `base_url` is the web backend root (e.g. `http://search.local:8080`);
    /// admin paths are appended to it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client(&base_url)?;
        Ok(Self {
            http,
            base_url,
            lenient_status: transport.lenient_status,
        })
    }

    /// Create an admin client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            lenient_status: false,
        }
    }

    /// Judge non-2xx responses by their envelope code when the body parses.
    pub fn with_lenient_status(mut self, lenient: bool) -> Self {
        self.lenient_status = lenient;
        self
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an admin path: `{base}/admin/{path}`.
    pub(crate) fn admin_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/admin/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Send a form-encoded POST request and unwrap the envelope.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &[(&str, &str)],
    ) -> Result<Option<T>, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{code, msg, data}` envelope, returning `data` on success
    /// or an `Error::Api` if `code != 0`.
    ///
    /// Non-2xx statuses fail with `Error::Http` unless the client is
    /// lenient and the body still decodes as an envelope.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            if self.lenient_status {
                if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&body) {
                    trace!(status = status.as_u16(), "decoded envelope from non-2xx response");
                    return unwrap_envelope(envelope);
                }
            }
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<Option<T>, Error> {
    if envelope.is_success() {
        return Ok(envelope.data);
    }
    debug!(code = envelope.code, msg = ?envelope.msg, "admin API returned failure code");
    Err(Error::Api {
        code: envelope.code,
        message: envelope.msg,
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
