//! The request line of an incoming request.

use crate::query::split_query;
use serde::Serialize;

/// Method and URI of an incoming request. Headers and body are not part of
/// matching and are not carried here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestHead {
    pub method: String,
    /// Path with an optional `?query` suffix.
    pub uri: String,
}

impl RequestHead {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }

    /// Parse an HTTP/1.x request line such as `GET /users?page=1 HTTP/1.1`.
    ///
    /// The protocol version is optional and ignored. Returns `None` unless
    /// both a method and a URI are present.
    pub fn parse_request_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let method = parts.next()?;
        let uri = parts.next()?;
        Some(Self::new(method, uri))
    }

    /// The URI up to the first `?`.
    pub fn path(&self) -> &str {
        split_query(&self.uri).0
    }

    /// The raw query string, if the URI has one.
    pub fn query(&self) -> Option<&str> {
        split_query(&self.uri).1
    }
}
