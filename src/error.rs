//! Error types for the brochure pipeline
//!
//! Pure transforms (link extraction, cleaning, sanitizing) never fail. Only
//! the I/O boundaries do, and each boundary has its own error type so the
//! pipeline can decide between skipping and aborting.

use thiserror::Error;

/// Failure while downloading a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connection refused, TLS, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The server answered with something other than HTML
    #[error("{url} is not HTML (content-type: {content_type})")]
    NotHtml { url: String, content_type: String },

    /// WebDriver session or navigation failure
    #[error("webdriver failed on {url}: {message}")]
    WebDriver { url: String, message: String },
}

impl FetchError {
    /// URL the failed fetch was aimed at
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::NotHtml { url, .. }
            | FetchError::WebDriver { url, .. } => url,
        }
    }
}

/// Failure while talking to the text-generation backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("backend request timed out")]
    Timeout,

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend reply: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Request(err)
        }
    }
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The home page could not be fetched, so there is nothing to work from
    #[error("could not fetch home page: {0}")]
    HomePage(#[source] FetchError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
