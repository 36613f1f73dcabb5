//! Search operation: build-and-send plus body normalization.

pub mod request;
pub mod response;

pub use request::SearchRequest;
pub use response::{SearchResponse, SearchResult, parse_search_results};

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::{ClientConfig, ClientError, auth_headers, encode, join_base, overlay_custom_headers};

/// Target URL: base plus the encoded query, plus one `site` pair per filter.
pub(crate) fn build_search_url(base: &str, req: &SearchRequest) -> String {
    let mut target = join_base(base, &encode::query_component(&req.query));

    if !req.sites.is_empty() {
        let mut pairs = url::form_urlencoded::Serializer::new(String::new());
        for site in &req.sites {
            pairs.append_pair("site", site);
        }
        target.push('?');
        target.push_str(&pairs.finish());
    }

    target
}

/// Assemble the search call's headers.
pub(crate) fn search_headers(config: &ClientConfig, req: &SearchRequest) -> Result<HeaderMap, ClientError> {
    let mut headers = auth_headers(config)?;
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(format) = req.response_format {
        headers.insert("X-Respond-With", HeaderValue::from_static(format.as_str()));
    }
    overlay_custom_headers(&mut headers, &req.headers)?;
    Ok(headers)
}

/// Execute a search call.
pub(crate) async fn send(
    http: &reqwest::Client, config: &ClientConfig, req: &SearchRequest,
) -> Result<SearchResponse, ClientError> {
    req.validate()?;

    let target = build_search_url(&config.search_base_url, req);
    let headers = search_headers(config, req)?;

    tracing::debug!("searching: query={}", req.query);

    let http_response = http.get(&target).headers(headers).send().await?;

    let status = http_response.status();
    tracing::debug!("search API response status: {}", status);

    let body = http_response.text().await?;
    if !status.is_success() {
        return Err(ClientError::status(status.as_u16(), &body));
    }

    let results = parse_search_results(&body);
    tracing::debug!("search returned {} results", results.len());

    Ok(SearchResponse { query: req.query.clone(), results })
}
