// Sigfox v2 API HTTP client
//
// Wraps `reqwest::Client` with base-URL normalization, basic
// authentication, envelope unwrapping, and status classification.
// Endpoint groups (devices, device types, groups, messages) are
// implemented as inherent methods in separate modules to keep this one
// focused on transport mechanics.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::limiter::RequestLimiter;
use crate::models::Envelope;

/// Production endpoint of the Sigfox backend API.
pub const DEFAULT_BASE_URL: &str = "https://api.sigfox.com/v2/";

/// Suggested delay, in seconds, when the backend answers 429.
const RETRY_AFTER_SECS: u64 = 5;

/// Minimum spacing between message-retrieval requests.
const MESSAGE_WINDOW: Duration = Duration::from_secs(5);

/// Default bound on one pagination walk.
const DEFAULT_MAX_PAGES: u32 = 1000;

/// Async client for the Sigfox v2 REST API.
///
/// Holds immutable basic-auth credentials, the base URL, and one shared
/// `reqwest::Client`; the message endpoints additionally share a
/// [`RequestLimiter`]. The client keeps no other state between calls.
pub struct SigfoxClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    pub(crate) limiter: RequestLimiter,
    pub(crate) max_pages: Option<u32>,
}

impl SigfoxClient {
    /// Client against the production API at [`DEFAULT_BASE_URL`].
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::builder(credentials).build()
    }

    /// Start building a client with non-default settings.
    pub fn builder(credentials: Credentials) -> SigfoxClientBuilder {
        SigfoxClientBuilder {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            message_interval: MESSAGE_WINDOW,
            max_pages: Some(DEFAULT_MAX_PAGES),
            timeout: None,
        }
    }

    /// The resolved base URL (always ends with a slash).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"device-types"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(self.credentials.login(), Some(self.credentials.password()))
    }

    /// Send an authenticated GET without interpreting the response.
    pub(crate) async fn send_get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {url}");
        Ok(self.request(Method::GET, url).send().await?)
    }

    /// GET an endpoint returning a bare JSON object (no envelope).
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.send_get(url).await?;
        handle_response(resp).await
    }

    /// GET a list endpoint, keeping the envelope (for pagination).
    pub(crate) async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Envelope<T>, Error> {
        self.get_json(url).await
    }

    /// GET a list endpoint and unwrap the `{ data, paging }` envelope.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        Ok(self.get_envelope(url).await?.data)
    }

    /// PUT a JSON body, expecting no meaningful response payload.
    pub(crate) async fn put_empty<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), Error> {
        debug!(
            "PUT {url} body={}",
            serde_json::to_string(body).unwrap_or_default()
        );
        let resp = self.request(Method::PUT, url).json(body).send().await?;
        handle_empty(resp).await
    }

    /// POST a JSON body and return the parsed response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!(
            "POST {url} body={}",
            serde_json::to_string(body).unwrap_or_default()
        );
        let resp = self.request(Method::POST, url).json(body).send().await?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(classify_status(status, resp).await);
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Protocol {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(classify_status(status, resp).await)
    }
}

/// Map a non-success status onto the error taxonomy. 429 is the only
/// specially classified rejection; everything else keeps its status.
async fn classify_status(status: StatusCode, resp: reqwest::Response) -> Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited {
            retry_after_secs: RETRY_AFTER_SECS,
        };
    }
    let body = resp.text().await.unwrap_or_default();
    let preview = &body[..body.len().min(200)];
    Error::Api {
        status: status.as_u16(),
        message: if preview.is_empty() {
            status.to_string()
        } else {
            preview.to_owned()
        },
    }
}

// ── Builder ──────────────────────────────────────────────────────────

/// Builder for [`SigfoxClient`].
///
/// The base URL, message-window length, pagination bound, and an
/// optional request timeout can all be overridden; production callers
/// normally use [`SigfoxClient::new`].
pub struct SigfoxClientBuilder {
    credentials: Credentials,
    base_url: String,
    message_interval: Duration,
    max_pages: Option<u32>,
    timeout: Option<Duration>,
}

impl SigfoxClientBuilder {
    /// Point the client at a different API root (e.g. a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Minimum spacing between message-retrieval requests.
    pub fn message_interval(mut self, interval: Duration) -> Self {
        self.message_interval = interval;
        self
    }

    /// Bound on the pages followed in one walk. `None` removes the
    /// bound; the cursor chain is then trusted to terminate.
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Per-request timeout. Off by default (the transport decides).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the base URL and build the HTTP client.
    ///
    /// No network I/O happens here; the first request does.
    pub fn build(self) -> Result<SigfoxClient, Error> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("sigfly/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(SigfoxClient {
            http,
            base_url,
            credentials: self.credentials,
            limiter: RequestLimiter::new(self.message_interval),
            max_pages: self.max_pages,
        })
    }
}

/// Parse and normalize the base URL so that relative joins append to
/// the path instead of replacing its final segment.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
