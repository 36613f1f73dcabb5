//! Search response types and body normalization.

use serde::{Deserialize, Serialize};

/// Normalized search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The query as submitted.
    pub query: String,

    /// Results in API/parse order, never re-sorted.
    pub results: Vec<SearchResult>,
}

/// Normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Result content; a full document, or a single line in degraded mode.
    pub content: String,
}

/// Envelope shape: `{"data": [...]}`.
#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<RawRecord>,
}

/// One record as the API emits it, every field optional.
#[derive(Debug, Default, Deserialize)]
struct RawRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    // Present in the envelope shape; not surfaced in results.
    #[serde(default)]
    #[allow(dead_code)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl From<RawRecord> for SearchResult {
    fn from(raw: RawRecord) -> Self {
        SearchResult {
            title: raw.title.filter(|t| !t.is_empty()),
            url: raw.url.filter(|u| !u.is_empty()),
            content: raw.content.unwrap_or_default(),
        }
    }
}

/// Normalize a raw search response body into results.
///
/// Ordered parse attempts: a `{"data": [...]}` object with a non-empty
/// array, then a bare JSON array (accepted even when empty), then
/// line-splitting. The final fallback succeeds for any input, so an
/// unexpected body shape degrades instead of failing.
pub fn parse_search_results(body: &str) -> Vec<SearchResult> {
    let trimmed = body.trim();

    if trimmed.starts_with('{') {
        if let Ok(envelope) = serde_json::from_str::<DataEnvelope>(trimmed)
            && !envelope.data.is_empty()
        {
            return envelope.data.into_iter().map(Into::into).collect();
        }
    } else if trimmed.starts_with('[') {
        if let Ok(records) = serde_json::from_str::<Vec<RawRecord>>(trimmed) {
            return records.into_iter().map(Into::into).collect();
        }
    }

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| SearchResult { title: None, url: None, content: line.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE_JSON: &str = r#"{
        "data": [
            {
                "title": "Example Domain",
                "url": "https://example.com",
                "description": "An illustrative example",
                "content": "Full page content"
            },
            {
                "title": "Second",
                "url": "https://second.example",
                "description": "",
                "content": "More content"
            }
        ]
    }"#;

    #[test]
    fn test_parse_envelope_maps_fields_and_drops_description() {
        let results = parse_search_results(ENVELOPE_JSON);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.title.as_deref(), Some("Example Domain"));
        assert_eq!(first.url.as_deref(), Some("https://example.com"));
        assert_eq!(first.content, "Full page content");

        assert_eq!(results[1].title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_parse_envelope_preserves_order() {
        let results = parse_search_results(ENVELOPE_JSON);
        let titles: Vec<_> = results.iter().map(|r| r.title.as_deref().unwrap()).collect();
        assert_eq!(titles, ["Example Domain", "Second"]);
    }

    #[test]
    fn test_parse_bare_array() {
        let body = r#"[{"title": "A", "url": "https://a.example", "content": "a"}]"#;
        let results = parse_search_results(body);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_parse_empty_array_yields_zero_results() {
        // Not a fallback to line-splitting: "[]" is a valid, empty answer.
        assert!(parse_search_results("[]").is_empty());
        assert!(parse_search_results("  []  ").is_empty());
    }

    #[test]
    fn test_parse_empty_envelope_falls_back_to_lines() {
        let results = parse_search_results(r#"{"data": []}"#);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, r#"{"data": []}"#);
        assert_eq!(results[0].title, None);
    }

    #[test]
    fn test_parse_plain_text_lines() {
        let results = parse_search_results("Result 1\n\nResult 2\n  \nResult 3");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].content, "Result 1");
        assert_eq!(results[1].content, "Result 2");
        assert_eq!(results[2].content, "Result 3");
        assert!(results.iter().all(|r| r.title.is_none() && r.url.is_none()));
    }

    #[test]
    fn test_parse_malformed_json_degrades() {
        let results = parse_search_results("{not json");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "{not json");
    }

    #[test]
    fn test_parse_empty_input_yields_zero_results() {
        assert!(parse_search_results("").is_empty());
        assert!(parse_search_results("   \n \n").is_empty());
    }

    #[test]
    fn test_parse_tolerates_null_fields() {
        let body = r#"[{"title": null, "url": null, "content": "only content"}]"#;
        let results = parse_search_results(body);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, None);
        assert_eq!(results[0].url, None);
        assert_eq!(results[0].content, "only content");
    }

    #[test]
    fn test_empty_title_and_url_become_absent() {
        let body = r#"[{"title": "", "url": "", "content": "c"}]"#;
        let results = parse_search_results(body);
        assert_eq!(results[0].title, None);
        assert_eq!(results[0].url, None);
    }
}
