//! Connection settings for the remote transaction store.

use std::time::Duration;

use hyper::Uri;

/// The base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// How long to wait for the remote store to answer a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors for settings that cannot be used to reach the remote store.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// The base URL could not be parsed or is not an absolute `http://` URL.
    #[error("invalid base URL \"{0}\": {1}")]
    InvalidBaseUrl(String, String),

    /// The request timeout was zero.
    #[error("the request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Where the remote store lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    base_url: String,
    request_timeout: Duration,
}

impl Config {
    /// Create a new config.
    ///
    /// A trailing slash on `base_url` is removed so that endpoint paths can be
    /// appended directly.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ConfigError::InvalidBaseUrl] if `base_url` is not an absolute `http://` URL,
    /// - or [ConfigError::ZeroTimeout] if `request_timeout` is zero.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');

        let uri = base_url
            .parse::<Uri>()
            .map_err(|error| ConfigError::InvalidBaseUrl(base_url.to_owned(), error.to_string()))?;

        match (uri.scheme_str(), uri.host()) {
            (Some("http"), Some(_)) => {}
            (Some(scheme), Some(_)) => {
                return Err(ConfigError::InvalidBaseUrl(
                    base_url.to_owned(),
                    format!("unsupported scheme \"{scheme}\""),
                ));
            }
            _ => {
                return Err(ConfigError::InvalidBaseUrl(
                    base_url.to_owned(),
                    "expected an absolute URL such as http://localhost:8000/api".to_owned(),
                ));
            }
        }

        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url: base_url.to_owned(),
            request_timeout,
        })
    }

    /// The URL that endpoint paths are appended to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The maximum time to wait for a single request.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
