//! Endpoint matching: decide whether a registered stub handles a request.
//!
//! A request matches an endpoint when all three checks pass:
//!
//! 1. the request path (URI up to the first `?`) equals the endpoint path,
//!    case-sensitively and without normalization,
//! 2. the request method equals the endpoint method (see [`MatchOptions`]),
//! 3. every expected query parameter is present on the request with a value
//!    equal to the expected one, ignoring case. Extra request parameters are
//!    ignored, so an endpoint without expectations accepts any query string.
//!
//! Matching is pure and total: it never fails and has no side effects.

use crate::endpoint::RegisteredEndpoint;
use crate::options::MatchOptions;
use crate::query::{parse_query_with, split_uri};
use crate::request::RequestHead;

/// The first check that rejected a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("path '{actual}' does not equal '{expected}'")]
    Path { expected: String, actual: String },

    #[error("method '{actual}' does not equal '{expected}'")]
    Method { expected: String, actual: String },

    #[error("query parameter '{name}' is missing")]
    MissingQueryParam { name: String },

    #[error("query parameter '{name}' is '{actual}', expected '{expected}'")]
    QueryParamValue {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Matches requests against endpoints under a fixed set of options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndpointMatcher {
    options: MatchOptions,
}

impl EndpointMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Check if `request` should be handled by `endpoint`.
    pub fn is_match(&self, endpoint: &RegisteredEndpoint, request: &RequestHead) -> bool {
        self.explain(endpoint, request).is_ok()
    }

    /// Like [`is_match`](Self::is_match), but reports which check failed.
    ///
    /// Checks run in order path, method, query; expected parameters are
    /// checked in name order, so the reported mismatch is deterministic.
    pub fn explain(
        &self,
        endpoint: &RegisteredEndpoint,
        request: &RequestHead,
    ) -> Result<(), Mismatch> {
        let (path, query) = split_uri(&request.uri);

        if path != endpoint.path() {
            return Err(Mismatch::Path {
                expected: endpoint.path().to_string(),
                actual: path.to_string(),
            });
        }

        if !self
            .options
            .method_matches(endpoint.method(), &request.method)
        {
            return Err(Mismatch::Method {
                expected: endpoint.method().to_string(),
                actual: request.method.clone(),
            });
        }

        if endpoint.query_params().is_empty() {
            return Ok(());
        }

        let params = parse_query_with(query, self.options.decode_query);
        for (name, expected) in endpoint.query_params() {
            match params.get(name) {
                Some(actual) if eq_ignore_case(expected, actual) => {}
                Some(actual) => {
                    return Err(Mismatch::QueryParamValue {
                        name: name.clone(),
                        expected: expected.clone(),
                        actual: actual.clone(),
                    })
                }
                None => return Err(Mismatch::MissingQueryParam { name: name.clone() }),
            }
        }

        Ok(())
    }
}

/// Check `request` against `endpoint` with default [`MatchOptions`].
pub fn is_match(endpoint: &RegisteredEndpoint, request: &RequestHead) -> bool {
    EndpointMatcher::default().is_match(endpoint, request)
}

/// Case-insensitive string equality, with an ASCII fast path.
#[inline]
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}
