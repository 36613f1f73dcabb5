//! Percent-encoding helpers for request targets.
//!
//! The read endpoint takes the target URL as a single path segment, so
//! everything outside the RFC 3986 unreserved set is escaped there. The
//! search endpoint takes the query in `x-www-form-urlencoded` form.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Escape everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Encode a value for embedding as one path segment.
pub fn path_segment(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

/// Encode a value as a form-urlencoded component (space becomes `+`).
pub fn query_component(input: &str) -> String {
    url::form_urlencoded::byte_serialize(input.as_bytes()).collect()
}
