//! Options that modify endpoint matching.

use serde::{Deserialize, Serialize};

/// Options that modify endpoint matching behavior.
///
/// The defaults give the plain matching rules: exact method comparison, an
/// empty endpoint method matching only an empty request method, and query
/// values compared as written.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// Compare methods exactly (`false` folds ASCII case)
    #[serde(default = "default_method_case_sensitive")]
    pub method_case_sensitive: bool,

    /// Let an endpoint without a method accept any request method
    #[serde(default, skip_serializing_if = "is_false")]
    pub empty_method_matches_any: bool,

    /// Percent-decode query parameter names and values before comparing
    #[serde(default, skip_serializing_if = "is_false")]
    pub decode_query: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn default_method_case_sensitive() -> bool {
    true
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            method_case_sensitive: true,
            empty_method_matches_any: false,
            decode_query: false,
        }
    }
}

impl MatchOptions {
    /// Whether a request `actual` method satisfies the endpoint's `expected`.
    #[inline]
    pub fn method_matches(&self, expected: &str, actual: &str) -> bool {
        if expected.is_empty() && self.empty_method_matches_any {
            return true;
        }
        if self.method_case_sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        }
    }
}
