//! HTTP client for the Jina Reader and Search APIs.
//!
//! Provides a client that turns typed read/search requests into outbound
//! HTTP calls and normalizes the heterogeneous response bodies into stable
//! result types.
//!
//! ### Specification
//!
//! - **Read endpoint**: `GET {base}/{percent-encoded URL}`, or `POST {base}`
//!   with a form-encoded `url` field for SPA hash routing.
//! - **Search endpoint**: `GET {base}/{percent-encoded query}` with one
//!   repeated `site` query parameter per site filter.
//! - **Authentication**: optional `Authorization: Bearer` header.
//! - **Normalization**: search bodies may be a JSON object, a JSON array, or
//!   plain text; all three degrade gracefully into `SearchResult` lists.

pub mod encode;
pub mod error;
pub mod read;
pub mod search;

pub use error::ClientError;
pub use read::{ReadRequest, ReadResponse};
pub use search::{SearchRequest, SearchResponse, SearchResult};

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Default base URL for the read API.
const DEFAULT_READ_BASE_URL: &str = "https://r.jina.ai/";

/// Default base URL for the search API.
const DEFAULT_SEARCH_BASE_URL: &str = "https://s.jina.ai/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "rdr/0.1";

/// Response representation requested from the API via `X-Respond-With`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Markdown,
    Html,
    Text,
    Screenshot,
}

impl ResponseFormat {
    /// Wire name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Markdown => "markdown",
            ResponseFormat::Html => "html",
            ResponseFormat::Text => "text",
            ResponseFormat::Screenshot => "screenshot",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResponseFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(ResponseFormat::Markdown),
            "html" => Ok(ResponseFormat::Html),
            "text" => Ok(ResponseFormat::Text),
            "screenshot" => Ok(ResponseFormat::Screenshot),
            _ => Err(ClientError::InvalidRequest(format!("unknown response format: {s}"))),
        }
    }
}

/// Reader API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the read API.
    pub read_base_url: String,
    /// Base URL of the search API.
    pub search_base_url: String,
    /// API key, sent as a bearer token when present.
    pub api_key: Option<String>,
    /// Request timeout applied uniformly to every request.
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_base_url: DEFAULT_READ_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Reader API client.
///
/// Holds one reqwest client; the configuration is a per-invocation snapshot,
/// nothing is shared across processes.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReaderClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch a URL and return its content in the requested representation.
    pub async fn read(&self, req: &ReadRequest) -> Result<ReadResponse, ClientError> {
        read::send(&self.http, &self.config, req).await
    }

    /// Query the search API and return the normalized result list.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, ClientError> {
        search::send(&self.http, &self.config, req).await
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Headers shared by every API call: the bearer token, when configured.
pub(crate) fn auth_headers(config: &ClientConfig) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = &config.api_key {
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| ClientError::InvalidRequest(format!("invalid API key: {e}")))?;
        headers.insert(header::AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Overlay caller-supplied headers; they win over any computed header.
pub(crate) fn overlay_custom_headers(
    headers: &mut HeaderMap, custom: &std::collections::HashMap<String, String>,
) -> Result<(), ClientError> {
    for (name, value) in custom {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidRequest(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid header value for {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(())
}

/// Join a base URL and an encoded trailing segment without doubling slashes.
pub(crate) fn join_base(base: &str, encoded: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), encoded)
}
