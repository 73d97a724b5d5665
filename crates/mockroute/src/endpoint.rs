//! Registered stub endpoints.

use crate::query::{ParsedUri, QueryParams};
use crate::request::RequestHead;
use serde::Serialize;

/// Match criteria of a registered stub.
///
/// Built once at registration time and never changed afterwards; fields are
/// read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEndpoint {
    method: String,
    path: String,
    #[serde(rename = "query", skip_serializing_if = "QueryParams::is_empty")]
    query_params: QueryParams,
}

impl RegisteredEndpoint {
    /// Create an endpoint with no expected query parameters.
    ///
    /// An empty `method` is kept as-is; whether it matches anything is up to
    /// [`MatchOptions::empty_method_matches_any`](crate::MatchOptions).
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query_params: QueryParams::new(),
        }
    }

    /// Require a query parameter. A repeated name replaces the earlier value.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Require every parameter in `params`.
    pub fn with_query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// A request this endpoint is expected to accept: its own method, path
    /// and expected parameters.
    ///
    /// Names or values containing `&`, `=` or `?` do not survive the trip
    /// through a query string, so the sample will not match such endpoints.
    pub fn sample_request(&self) -> RequestHead {
        let uri = ParsedUri {
            path: self.path.clone(),
            params: self.query_params.clone(),
        }
        .to_uri();
        RequestHead::new(self.method.clone(), uri)
    }
}
