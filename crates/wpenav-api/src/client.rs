// Account API HTTP client
//
// Wraps `reqwest::Client` with WP Engine-specific URL construction,
// Basic auth injection, and error-body parsing. Endpoint methods live
// in separate files (sites.rs) as inherent impls, keeping this module
// focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production base URL of the WP Engine Account API.
pub const DEFAULT_API_URL: &str = "https://api.wpengineapi.com/v1";

/// The API reports failures as `{"message": "..."}` bodies.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Raw HTTP client for the WP Engine Account API.
///
/// Every request carries HTTP Basic auth built from the account's API
/// username and password. Methods return deserialized payloads; status
/// triage happens before the caller sees a body.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should be the API root (normally [`DEFAULT_API_URL`]);
    /// it is overridable for tests and staging endpoints.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
        }
    }

    /// The configured API username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET request and deserialize the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_response(resp).await
    }

    /// Triage the HTTP status, then deserialize the success body.
    ///
    /// 401 and 403 map to [`Error::Authentication`]; other non-success
    /// statuses become [`Error::Api`] carrying the `{"message": ...}`
    /// body when the API supplied one.
    async fn parse_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let message = Self::error_message(resp)
                .await
                .unwrap_or_else(|| "bad or missing API credentials".into());
            return Err(Error::Authentication { message });
        }

        if !status.is_success() {
            let message = Self::error_message(resp)
                .await
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Extract the human-readable message from an error body, if any.
    async fn error_message(resp: reqwest::Response) -> Option<String> {
        let body = resp.text().await.ok()?;
        let parsed: ApiErrorBody = serde_json::from_str(&body).ok()?;
        parsed.message
    }
}
