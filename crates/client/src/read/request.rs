//! Read request parameters.

use std::collections::HashMap;

use crate::{ClientError, ResponseFormat};

/// Parameters for a read (content extraction) call.
///
/// Exactly one transport is used per request: GET with the target URL
/// percent-encoded into the path, or POST with a form-encoded `url` field
/// when `post_method` is set (SPA hash routing).
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    /// Target URL to read (required).
    pub url: String,

    /// Use the POST transport instead of GET.
    pub post_method: bool,

    /// Requested response representation, sent as `X-Respond-With`.
    pub response_format: Option<ResponseFormat>,

    /// Caller-supplied headers, overlaid last (they win over computed ones).
    pub headers: HashMap<String, String>,

    /// Bypass the API-side cache (`X-No-Cache`).
    pub no_cache: bool,

    /// Proxy server URL forwarded as `X-Proxy-URL`.
    pub proxy_url: Option<String>,

    /// CSS selector for content extraction (`X-Target-Selector`).
    pub target_selector: Option<String>,

    /// CSS selector to wait for before extraction (`X-Wait-For-Selector`).
    pub wait_for_selector: Option<String>,

    /// Cookie string forwarded as `X-Set-Cookie`.
    pub cookie: Option<String>,

    /// Enable image captioning (`X-With-Generated-Alt`).
    pub with_generated_alt: bool,
}

impl ReadRequest {
    /// Validate the request parameters.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.url.is_empty() {
            return Err(ClientError::InvalidRequest("url cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = ReadRequest { url: "https://example.com".to_string(), ..Default::default() };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_url() {
        let req = ReadRequest::default();
        assert!(matches!(req.validate(), Err(ClientError::InvalidRequest(_))));
    }

    #[test]
    fn test_defaults() {
        let req = ReadRequest::default();
        assert!(!req.post_method);
        assert!(!req.no_cache);
        assert!(!req.with_generated_alt);
        assert!(req.response_format.is_none());
        assert!(req.headers.is_empty());
    }
}
