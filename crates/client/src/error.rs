//! Reader API client error types.

use std::sync::Arc;

/// Longest response-body prefix carried inside a status error.
const MAX_ERROR_BODY: usize = 512;

/// Errors from the Reader API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request could not be constructed (empty URL/query, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success HTTP status, with a snippet of the response body.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl ClientError {
    /// Build a status error, truncating the body to a displayable snippet.
    pub(crate) fn status(status: u16, body: &str) -> Self {
        let body = if body.chars().count() > MAX_ERROR_BODY {
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            format!("{snippet}...")
        } else {
            body.to_string()
        };
        ClientError::Status { status, body }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ClientError::Timeout } else { ClientError::Network(Arc::new(err)) }
    }
}
