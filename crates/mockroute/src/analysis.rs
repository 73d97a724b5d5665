//! Stub analysis for detecting stubs that can never be selected.
//!
//! Lookup is first-match-wins, so a stub is unreachable when an earlier stub
//! accepts every request the later one accepts: same path, a method that
//! covers the later method, and expected query parameters that are a subset
//! of the later stub's.

use crate::endpoint::RegisteredEndpoint;
use crate::matcher::eq_ignore_case;
use crate::options::MatchOptions;
use serde::Serialize;

/// Kinds of warnings produced by [`analyze_endpoints`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Same criteria as an earlier stub
    ExactDuplicate,
    /// An earlier, more general stub accepts every request this one would
    Shadowed,
}

/// An unreachable stub and the earlier stub hiding it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StubWarning {
    pub kind: WarningKind,
    pub index: usize,
    pub shadowed_by: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StubAnalysis {
    pub warnings: Vec<StubWarning>,
}

impl StubAnalysis {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warning_for(&self, index: usize) -> Option<&StubWarning> {
        self.warnings.iter().find(|w| w.index == index)
    }
}

/// Analyze endpoints in registration order.
///
/// Each stub gets at most one warning, naming the earliest stub covering it.
pub fn analyze_endpoints(endpoints: &[RegisteredEndpoint], options: &MatchOptions) -> StubAnalysis {
    let mut analysis = StubAnalysis::default();

    for (index, later) in endpoints.iter().enumerate() {
        let Some((earlier_index, earlier)) = endpoints[..index]
            .iter()
            .enumerate()
            .find(|(_, earlier)| covers(earlier, later, options))
        else {
            continue;
        };

        let (kind, message) = if covers(later, earlier, options) {
            (
                WarningKind::ExactDuplicate,
                format!(
                    "Stub {index} ({} {}) duplicates stub {earlier_index}",
                    later.method(),
                    later.path()
                ),
            )
        } else {
            (
                WarningKind::Shadowed,
                format!(
                    "Stub {index} ({} {}) is shadowed by the more general stub {earlier_index}",
                    later.method(),
                    later.path()
                ),
            )
        };

        analysis.warnings.push(StubWarning {
            kind,
            index,
            shadowed_by: earlier_index,
            message,
        });
    }

    analysis
}

/// Whether every request matching `later` also matches `earlier`.
fn covers(earlier: &RegisteredEndpoint, later: &RegisteredEndpoint, options: &MatchOptions) -> bool {
    if earlier.path() != later.path() {
        return false;
    }

    let earlier_any = earlier.method().is_empty() && options.empty_method_matches_any;
    let later_any = later.method().is_empty() && options.empty_method_matches_any;
    let methods_covered = if earlier_any {
        true
    } else if later_any {
        false
    } else {
        options.method_matches(earlier.method(), later.method())
    };
    if !methods_covered {
        return false;
    }

    earlier
        .query_params()
        .iter()
        .all(|(name, expected)| match later.query_params().get(name) {
            Some(value) => eq_ignore_case(expected, value),
            None => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(endpoints: &[RegisteredEndpoint]) -> StubAnalysis {
        analyze_endpoints(endpoints, &MatchOptions::default())
    }

    #[test]
    fn test_no_warnings_for_different_stubs() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/users"),
            RegisteredEndpoint::new("POST", "/users"),
            RegisteredEndpoint::new("GET", "/items"),
        ]);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_exact_duplicate_detection() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "one"),
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "ONE"),
        ]);
        assert_eq!(result.warnings.len(), 1);
        let warning = &result.warnings[0];
        assert_eq!(warning.kind, WarningKind::ExactDuplicate);
        assert_eq!(warning.index, 1);
        assert_eq!(warning.shadowed_by, 0);
    }

    #[test]
    fn test_shadowing_by_fewer_query_params() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/users"),
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "2"),
        ]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::Shadowed);
        assert!(result.warnings[0].message.contains("shadowed by"));
    }

    #[test]
    fn test_specific_before_general_is_fine() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "2"),
            RegisteredEndpoint::new("GET", "/users"),
        ]);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_different_param_value_is_not_shadowed() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "1"),
            RegisteredEndpoint::new("GET", "/users").with_query_param("page", "2"),
        ]);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_empty_method_shadows_when_it_matches_any() {
        let endpoints = [
            RegisteredEndpoint::new("", "/ping"),
            RegisteredEndpoint::new("GET", "/ping"),
        ];
        assert!(!analyze(&endpoints).has_warnings());

        let options = MatchOptions {
            empty_method_matches_any: true,
            ..Default::default()
        };
        let result = analyze_endpoints(&endpoints, &options);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::Shadowed);
    }

    #[test]
    fn test_specific_method_does_not_cover_any_method() {
        let options = MatchOptions {
            empty_method_matches_any: true,
            ..Default::default()
        };
        let result = analyze_endpoints(
            &[
                RegisteredEndpoint::new("GET", "/ping"),
                RegisteredEndpoint::new("", "/ping"),
            ],
            &options,
        );
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_case_insensitive_methods_duplicate() {
        let options = MatchOptions {
            method_case_sensitive: false,
            ..Default::default()
        };
        let endpoints = [
            RegisteredEndpoint::new("get", "/ping"),
            RegisteredEndpoint::new("GET", "/ping"),
        ];
        assert!(!analyze(&endpoints).has_warnings());
        assert_eq!(
            analyze_endpoints(&endpoints, &options).warnings[0].kind,
            WarningKind::ExactDuplicate
        );
    }

    #[test]
    fn test_one_warning_per_stub_against_earliest() {
        let result = analyze(&[
            RegisteredEndpoint::new("GET", "/a"),
            RegisteredEndpoint::new("GET", "/a"),
            RegisteredEndpoint::new("GET", "/a"),
        ]);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warning_for(1).unwrap().shadowed_by, 0);
        assert_eq!(result.warning_for(2).unwrap().shadowed_by, 0);
        assert!(result.warning_for(0).is_none());
    }
}
