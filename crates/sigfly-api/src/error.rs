use thiserror::Error;

/// Top-level error type for the `sigfly-api` crate.
///
/// Covers every failure mode: configuration, authentication, transport,
/// backend rejections, and malformed response bodies.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Missing or invalid client configuration.
    /// Raised before any network call is attempted.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The login probe was rejected (wrong credentials, disabled account).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (base URL or paging cursor).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Backend ─────────────────────────────────────────────────────
    /// Rate limited by the backend (HTTP 429). Includes the suggested
    /// retry delay in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-success status, with a body preview.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A pagination walk exceeded the configured page bound. The
    /// backend's cursor chain is assumed finite; hitting this usually
    /// means a cyclic `paging.next`.
    #[error("Pagination exceeded {pages} pages (possible cursor cycle)")]
    PaginationLimit { pages: u32 },

    // ── Data ────────────────────────────────────────────────────────
    /// A success response whose body failed to parse as the expected
    /// JSON shape. Carries the raw body for debugging.
    #[error("Protocol error: {message}")]
    Protocol { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// The raw response body, when one was captured.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Protocol { body, .. } => Some(body),
            _ => None,
        }
    }
}
