//! BART client error types.

/// Errors from fetching or decoding a BART API response.
#[derive(Debug, thiserror::Error)]
pub enum BartError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not JSON at all
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The body was JSON but neither parse stage could find the records
    #[error("unexpected {endpoint} response: {message}")]
    Schema { endpoint: &'static str, message: String },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by BART API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Base URL or API key could not be used to build a request
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl BartError {
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        BartError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
