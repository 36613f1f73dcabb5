//! Read response type and title derivation.

use serde::Serialize;

/// Result of a read call.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    /// Extracted content, the response body verbatim.
    pub content: String,

    /// The URL that was read.
    pub url: String,

    /// Title derived from the content, when one could be found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Pull a title out of markdown content.
///
/// The first trimmed line with a `# ` prefix wins; scanning stops there.
/// A bare `# ` heading with no text yields nothing.
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(str::to_string)
        .filter(|title| !title.is_empty())
}
