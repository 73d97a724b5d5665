//! Request URI splitting and query-string parsing.
//!
//! The parser never fails: empty segments (trailing or doubled `&`) are
//! skipped, a segment without `=` becomes a parameter with an empty value,
//! and a segment with an empty name is dropped. When a name repeats, the
//! last value wins.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Query parameters keyed by name.
pub type QueryParams = BTreeMap<String, String>;

/// A request URI split into its path and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUri {
    pub path: String,
    pub params: QueryParams,
}

impl ParsedUri {
    /// Re-serialize as `path?k=v&...`.
    ///
    /// Parameters are written in name order so the output is deterministic.
    /// Without parameters this is just the path.
    pub fn to_uri(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }

        let query = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }
}

/// Split a URI on its first `?`. The query is `None` when the URI has no `?`
/// and `Some("")` when it ends with one.
#[inline]
pub fn split_query(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

/// Split a URI on its first `?` into the path and the raw query part.
///
/// The query part is empty when the URI has no `?`.
#[inline]
pub fn split_uri(uri: &str) -> (&str, &str) {
    let (path, query) = split_query(uri);
    (path, query.unwrap_or(""))
}

/// Parse a URI into path and parameters, keeping values as written.
pub fn parse_uri(uri: &str) -> ParsedUri {
    parse_uri_with(uri, false)
}

/// Parse a URI, optionally percent-decoding parameter names and values.
///
/// The path is never decoded.
pub fn parse_uri_with(uri: &str, decode: bool) -> ParsedUri {
    let (path, query) = split_uri(uri);
    ParsedUri {
        path: path.to_string(),
        params: parse_query_with(query, decode),
    }
}

/// Parse a bare query string (no leading `?`).
pub fn parse_query_string(query: &str) -> QueryParams {
    parse_query_with(query, false)
}

/// Parse a bare query string, optionally percent-decoding names and values.
pub fn parse_query_with(query: &str, decode: bool) -> QueryParams {
    let mut params = QueryParams::new();
    for (name, value) in query_pairs(query) {
        if decode {
            params.insert(
                decode_component(name).into_owned(),
                decode_component(value).into_owned(),
            );
        } else {
            params.insert(name.to_string(), value.to_string());
        }
    }
    params
}

/// Iterate the raw `(name, value)` pairs of a query string in order.
pub fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            (!name.is_empty()).then_some((name, value))
        })
}

// `+` is left as-is; invalid UTF-8 escapes keep the raw text.
fn decode_component(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
