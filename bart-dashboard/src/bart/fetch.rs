//! Raw body transport for BART requests.
//!
//! A [`Fetcher`] turns an [`ApiRequest`] into a response body. The HTTP
//! implementation talks to the real API; the mock serves fixtures.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::BartError;
use super::request::ApiRequest;

/// Default base URL for the legacy BART API.
pub const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the BART HTTP client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production BART)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BartConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Something that can fetch the body of a BART API request.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<String, BartError>>;
}

/// Fetches bodies from the live API over HTTP.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl HttpFetcher {
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        if config.max_concurrent == 0 {
            return Err(BartError::InvalidConfig(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn get(&self, request: &ApiRequest) -> Result<String, BartError> {
        let url = request.url(&self.base_url, &self.api_key)?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| BartError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(cmd = request.cmd(), arg = request.arg(), "requesting");
        let response = self.http.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BartError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BartError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BartError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<String, BartError>> {
        self.get(request).boxed()
    }
}
