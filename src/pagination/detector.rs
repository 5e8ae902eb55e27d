//! Pagination classification from a single HTTP response

use super::types::DiscoveredPagination;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Response keys that wrap the actual result array, in priority order
pub const DATA_WRAPPER_KEYS: &[&str] = &["data", "results", "items", "records", "entries"];

/// Boolean flags signalling more pages exist
pub const HAS_MORE_KEYS: &[&str] = &["has_more", "hasMore", "has_next", "hasNext"];

/// Names used for cursor tokens, as response fields and query parameters
pub const CURSOR_KEYS: &[&str] = &[
    "next_cursor",
    "next",
    "starting_after",
    "cursor",
    "next_token",
    "after",
];

/// Classify a single HTTP response into a pagination strategy.
///
/// A `Link` header with `rel="next"` wins immediately, regardless of the
/// body shape. Body signals are then checked in priority order: has-more
/// flags, cursor tokens, offset/total counters. When only a wrapper key
/// is found, the result is still `none` but carries the data field, a
/// partial observation the caller can use.
pub fn detect_pagination(body: &Value, headers: &HeaderMap) -> DiscoveredPagination {
    if next_link(headers).is_some() {
        return DiscoveredPagination::link_header();
    }

    let Some(object) = body.as_object() else {
        return DiscoveredPagination::none();
    };

    let data_field = DATA_WRAPPER_KEYS
        .iter()
        .find(|key| object.get(**key).is_some_and(Value::is_array))
        .map(|key| (*key).to_string());

    if HAS_MORE_KEYS.iter().any(|key| object.contains_key(*key)) {
        // The flag alone proves cursor-style paging; the concrete cursor
        // parameter is left for the consumer to fill in.
        return DiscoveredPagination::cursor().with_data_field(data_field);
    }

    if let Some(key) = CURSOR_KEYS.iter().find(|key| object.contains_key(**key)) {
        return DiscoveredPagination::cursor()
            .with_cursor_param(*key)
            .with_cursor_field(*key)
            .with_data_field(data_field);
    }

    if object.contains_key("total")
        && (object.contains_key("offset") || object.contains_key("limit"))
    {
        let pagination = DiscoveredPagination::offset().with_data_field(data_field);
        if object.contains_key("limit") {
            return pagination.with_page_size_param("limit");
        }
        return pagination;
    }

    DiscoveredPagination::none().with_data_field(data_field)
}

/// Extract the `rel="next"` URL from the response's Link header, if any
fn next_link(headers: &HeaderMap) -> Option<String> {
    let header = headers.get("link").and_then(|v| v.to_str().ok())?;
    parse_link_header(header, "next")
}

/// Parse a Link header and extract the URL for the given rel
///
/// Header format: `<url>; rel="next", <url>; rel="prev"`
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(url), Some(rel)) = (url, rel) {
            if rel == target_rel {
                return Some(url.to_string());
            }
        }
    }

    None
}
