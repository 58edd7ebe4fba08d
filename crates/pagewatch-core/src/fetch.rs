//! HTTP GET of a watched resource.
//!
//! Uses the curl crate (libcurl). Only a `200` response counts as success;
//! every other outcome maps to a [`FetchError`] the detector records per URL.

use std::time::Duration;
use thiserror::Error;

use crate::config::DEFAULT_TIMEOUT_SECS;

/// Why a single fetch failed. The display strings are what ends up in the
/// run's error list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with something other than 200.
    #[error("Failed with status {0}")]
    HttpStatus(u32),
    /// Total request time exceeded the configured timeout.
    #[error("Request timeout")]
    Timeout,
    /// Connection, DNS, TLS or transfer failure.
    #[error("{0}")]
    Network(String),
    /// Anything libcurl reports that is not a transport problem.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Classify a libcurl error into a fetch error kind.
    pub fn from_curl(e: &curl::Error) -> Self {
        if e.is_operation_timedout() {
            return FetchError::Timeout;
        }
        if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_got_nothing()
            || e.is_ssl_connect_error()
            || e.is_peer_failed_verification()
            || e.is_partial_file()
            || e.is_too_many_redirects()
        {
            return FetchError::Network(e.to_string());
        }
        FetchError::Unexpected(e.to_string())
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::from_curl(&e)
    }
}

/// Something that can retrieve the raw bytes of a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking libcurl fetcher. One easy handle per request.
#[derive(Debug, Clone, Copy)]
pub struct CurlFetcher {
    timeout: Duration,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CurlFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)
            .map_err(|e| FetchError::Unexpected(format!("invalid URL: {}", e)))?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.timeout.min(Duration::from_secs(15)))?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 200 {
            tracing::debug!(url, code, "non-200 response");
            return Err(FetchError::HttpStatus(code));
        }
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
