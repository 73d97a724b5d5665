//! Property tests for parsing and matching.

use mockroute::{
    is_match, parse_uri, EndpointMatcher, MatchOptions, ParsedUri, QueryParams,
    RegisteredEndpoint, RequestHead,
};
use proptest::prelude::*;

fn path() -> impl Strategy<Value = String> {
    "/?[a-zA-Z0-9_/.-]{0,16}"
}

fn params() -> impl Strategy<Value = QueryParams> {
    prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,7}", "[a-zA-Z0-9._~-]{0,8}", 0..5)
}

fn method() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["GET", "PUT", "POST", "DELETE", "get", ""]).prop_map(String::from)
}

fn options() -> impl Strategy<Value = MatchOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(case, any_method, decode)| {
        MatchOptions {
            method_case_sensitive: case,
            empty_method_matches_any: any_method,
            decode_query: decode,
        }
    })
}

fn endpoint() -> impl Strategy<Value = RegisteredEndpoint> {
    (method(), path(), params())
        .prop_map(|(method, path, params)| RegisteredEndpoint::new(method, path).with_query_params(params))
}

/// Arbitrary request text, including malformed query strings.
fn request() -> impl Strategy<Value = RequestHead> {
    (method(), "[a-z/?&=%A-Z0-9]{0,24}").prop_map(|(method, uri)| RequestHead::new(method, uri))
}

proptest! {
    #[test]
    fn matching_is_pure(endpoint in endpoint(), request in request(), options in options()) {
        let matcher = EndpointMatcher::new(options);
        let first = matcher.is_match(&endpoint, &request);
        let second = matcher.is_match(&endpoint.clone(), &request.clone());
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            matcher.explain(&endpoint, &request),
            matcher.explain(&endpoint, &request)
        );
    }

    #[test]
    fn is_match_agrees_with_explain(endpoint in endpoint(), request in request(), options in options()) {
        let matcher = EndpointMatcher::new(options);
        prop_assert_eq!(
            matcher.is_match(&endpoint, &request),
            matcher.explain(&endpoint, &request).is_ok()
        );
    }

    #[test]
    fn parse_then_serialize_round_trips(path in "[a-zA-Z0-9_/.-]{0,16}", params in params()) {
        let parsed = ParsedUri { path: path.clone(), params: params.clone() };
        let reparsed = parse_uri(&parsed.to_uri());
        prop_assert_eq!(reparsed.path, path);
        prop_assert_eq!(reparsed.params, params);
    }

    #[test]
    fn endpoint_matches_its_sample_request(endpoint in endpoint(), options in options()) {
        let matcher = EndpointMatcher::new(options);
        prop_assert!(matcher.is_match(&endpoint, &endpoint.sample_request()));
    }

    #[test]
    fn extra_params_never_break_a_match(
        endpoint in endpoint(),
        extra_name in "x_[a-z]{1,6}",
        extra_value in "[a-z0-9]{0,6}",
    ) {
        prop_assume!(!endpoint.query_params().contains_key(&extra_name));
        let sample = endpoint.sample_request();
        let separator = if sample.uri.contains('?') { '&' } else { '?' };
        let request = RequestHead::new(
            sample.method.clone(),
            format!("{}{separator}{extra_name}={extra_value}&", sample.uri),
        );
        prop_assert!(is_match(&endpoint, &request));
    }

    #[test]
    fn query_values_ignore_case(endpoint in endpoint()) {
        let sample = endpoint.sample_request();
        let (path, query) = sample.uri.split_once('?').unwrap_or((sample.uri.as_str(), ""));
        let shouted = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => format!("{name}={}", value.to_uppercase()),
                None => pair.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");
        let request = RequestHead::new(sample.method.clone(), format!("{path}?{shouted}"));
        prop_assert!(is_match(&endpoint, &request));
    }

    #[test]
    fn different_path_never_matches(endpoint in endpoint(), suffix in "[a-z]{1,4}") {
        let sample = endpoint.sample_request();
        let (path, query) = sample.uri.split_once('?').unwrap_or((sample.uri.as_str(), ""));
        let request = RequestHead::new(sample.method.clone(), format!("{path}{suffix}?{query}"));
        prop_assert!(!is_match(&endpoint, &request));
    }
}
