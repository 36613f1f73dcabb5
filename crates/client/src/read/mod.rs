//! Read operation: build-and-send plus response assembly.

pub mod request;
pub mod response;

pub use request::ReadRequest;
pub use response::{ReadResponse, extract_title};

use reqwest::header::{HeaderMap, HeaderValue};

use crate::{ClientConfig, ClientError, ResponseFormat, auth_headers, encode, join_base, overlay_custom_headers};

/// Target URL for the GET transport: base plus the path-encoded target.
pub(crate) fn build_read_url(base: &str, url: &str) -> String {
    join_base(base, &encode::path_segment(url))
}

/// Assemble the read call's headers.
///
/// Computed headers first, then the caller's custom headers on top.
pub(crate) fn read_headers(config: &ClientConfig, req: &ReadRequest) -> Result<HeaderMap, ClientError> {
    let mut headers = auth_headers(config)?;

    let optional = |value: &str, what: &str| {
        HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid {what}: {e}")))
    };

    if let Some(format) = req.response_format {
        headers.insert("X-Respond-With", HeaderValue::from_static(format.as_str()));
    }
    if req.with_generated_alt {
        headers.insert("X-With-Generated-Alt", HeaderValue::from_static("true"));
    }
    if req.no_cache {
        headers.insert("X-No-Cache", HeaderValue::from_static("true"));
    }
    if let Some(proxy_url) = req.proxy_url.as_deref().filter(|v| !v.is_empty()) {
        headers.insert("X-Proxy-URL", optional(proxy_url, "proxy URL")?);
    }
    if let Some(selector) = req.target_selector.as_deref().filter(|v| !v.is_empty()) {
        headers.insert("X-Target-Selector", optional(selector, "target selector")?);
    }
    if let Some(selector) = req.wait_for_selector.as_deref().filter(|v| !v.is_empty()) {
        headers.insert("X-Wait-For-Selector", optional(selector, "wait selector")?);
    }
    if let Some(cookie) = req.cookie.as_deref().filter(|v| !v.is_empty()) {
        headers.insert("X-Set-Cookie", optional(cookie, "cookie")?);
    }

    overlay_custom_headers(&mut headers, &req.headers)?;
    Ok(headers)
}

/// Execute a read call.
pub(crate) async fn send(
    http: &reqwest::Client, config: &ClientConfig, req: &ReadRequest,
) -> Result<ReadResponse, ClientError> {
    req.validate()?;

    let headers = read_headers(config, req)?;

    let builder = if req.post_method {
        // POST transport for SPA hash routing: the target rides in the form
        // body, Content-Type comes from the form encoder.
        http.post(config.read_base_url.trim_end_matches('/'))
            .form(&[("url", req.url.as_str())])
    } else {
        http.get(build_read_url(&config.read_base_url, &req.url))
    };

    tracing::debug!("reading {} (post={})", req.url, req.post_method);

    let http_response = builder.headers(headers).send().await?;

    let status = http_response.status();
    tracing::debug!("read API response status: {}", status);

    let body = http_response.text().await?;
    if !status.is_success() {
        return Err(ClientError::status(status.as_u16(), &body));
    }

    // Title derivation only makes sense for markdown-shaped content.
    let title = match req.response_format {
        None | Some(ResponseFormat::Markdown) => extract_title(&body),
        Some(_) => None,
    };

    Ok(ReadResponse { content: body, url: req.url.clone(), title })
}
