//! External page fetch boundary.
//!
//! One attempt per page with a fixed client timeout. No retry and no
//! backoff: callers absorb failures and move on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    Client,
};
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Failure modes of a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status.
    #[error("non-success status {0}")]
    Status(u16),
    /// Transport-level failure (DNS, TLS, timeout, connection).
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Abstract page fetcher so the pipeline can run against test doubles.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page body at `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Builds a fetcher with browser-like request headers and the fixed
    /// timeout.
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))
    }
}
