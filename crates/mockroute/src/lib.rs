//! Endpoint matching for HTTP mock servers.
//!
//! Given a registered stub endpoint (path, method, expected query parameters)
//! and the request line of an incoming request, decide whether the stub
//! should handle the request. On top of that predicate the crate provides a
//! first-match-wins [`StubTable`], an analysis of unreachable stubs, and a
//! YAML/JSON stub file format.
//!
//! # Example
//!
//! ```
//! use mockroute::{is_match, RegisteredEndpoint, RequestHead};
//!
//! let endpoint = RegisteredEndpoint::new("GET", "/users").with_query_param("page", "one");
//!
//! assert!(is_match(&endpoint, &RequestHead::new("GET", "/users?page=OnE&sort=asc")));
//! assert!(!is_match(&endpoint, &RequestHead::new("GET", "/users")));
//! assert!(!is_match(&endpoint, &RequestHead::new("PUT", "/users?page=one")));
//! ```
//!
//! # Module Structure
//!
//! - `query` - URI splitting and query-string parsing
//! - `endpoint` - Registered stub criteria
//! - `request` - Incoming request line
//! - `options` - Match options (method case, empty method, decoding)
//! - `matcher` - The match predicate and mismatch explanations
//! - `table` - Ordered stub table with first-match lookup
//! - `analysis` - Detection of duplicate and shadowed stubs
//! - `config` - Stub file loading and validation

mod analysis;
mod config;
mod endpoint;
mod error;
mod matcher;
mod options;
mod request;
mod table;

pub mod query;

pub use analysis::{analyze_endpoints, StubAnalysis, StubWarning, WarningKind};
pub use config::{CannedResponse, StubDefinition, StubFile};
pub use endpoint::RegisteredEndpoint;
pub use error::ConfigError;
pub use matcher::{is_match, EndpointMatcher, Mismatch};
pub use options::MatchOptions;
pub use query::{parse_query_string, parse_uri, split_query, ParsedUri, QueryParams};
pub use request::RequestHead;
pub use table::{StubEntry, StubTable};
