//! Stub file configuration.
//!
//! Stubs are declared in YAML (or JSON, for files with a `.json` extension):
//!
//! ```yaml
//! options:
//!   methodCaseSensitive: true
//! stubs:
//!   - name: list-users
//!     path: /users
//!     method: GET
//!     query:
//!       page: 1
//!     response:
//!       status: 200
//!       body: "[]"
//! ```
//!
//! Query values may be written as strings, integers or booleans; they are
//! compared as text. Fractional numbers must be quoted, since `1.10` would
//! otherwise be read back as `1.1`.

use crate::analysis::StubAnalysis;
use crate::endpoint::RegisteredEndpoint;
use crate::error::ConfigError;
use crate::options::MatchOptions;
use crate::query::QueryParams;
use crate::table::StubTable;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StubFile {
    #[serde(default)]
    pub options: MatchOptions,

    #[serde(default)]
    pub stubs: Vec<StubDefinition>,
}

/// One stub: its match criteria and the canned response it selects.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StubDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub path: String,

    /// Empty when omitted
    #[serde(default)]
    pub method: String,

    /// Expected query parameters (all must be present)
    #[serde(
        default,
        deserialize_with = "deserialize_query",
        skip_serializing_if = "QueryParams::is_empty"
    )]
    pub query: QueryParams,

    #[serde(default)]
    pub response: CannedResponse,
}

impl StubDefinition {
    pub fn to_endpoint(&self) -> RegisteredEndpoint {
        RegisteredEndpoint::new(self.method.clone(), self.path.clone())
            .with_query_params(self.query.clone())
    }

    /// The stub's name, or `#<index>` when it has none.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        }
    }
}

/// Response returned when a stub is selected. Opaque to matching.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CannedResponse {
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl Default for CannedResponse {
    fn default() -> Self {
        Self {
            status: default_status(),
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

impl StubFile {
    /// Load and validate a stub file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: StubFile = serde_yaml::from_str(yaml)?;
        file.validate()?;
        Ok(file)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: StubFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate stub definitions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for (index, stub) in self.stubs.iter().enumerate() {
            if stub.path.is_empty() {
                return Err(ConfigError::EmptyPath { index });
            }

            // The request path never contains '?', so such a stub is dead
            if stub.path.contains('?') {
                return Err(ConfigError::QueryInPath {
                    index,
                    path: stub.path.clone(),
                });
            }

            if stub.query.keys().any(|name| name.is_empty()) {
                return Err(ConfigError::EmptyQueryName { index });
            }

            if let Some(name) = &stub.name {
                if !names.insert(name.as_str()) {
                    return Err(ConfigError::DuplicateName { name: name.clone() });
                }
            }

            if stub.method.is_empty() && !self.options.empty_method_matches_any {
                warn!(
                    stub = %stub.label(index),
                    "Stub has no method and will only match requests without one; \
                     set options.emptyMethodMatchesAny to accept any method"
                );
            }
        }

        Ok(())
    }

    /// Build a lookup table, logging any stubs that can never be selected.
    pub fn into_table(self) -> StubTable<StubDefinition> {
        let (table, analysis) = self.into_table_with_analysis();
        for warning in &analysis.warnings {
            warn!(
                index = warning.index,
                shadowed_by = warning.shadowed_by,
                "{}",
                warning.message
            );
        }
        table
    }

    /// Build a lookup table and hand back the unreachable-stub analysis
    /// without logging it.
    pub fn into_table_with_analysis(self) -> (StubTable<StubDefinition>, StubAnalysis) {
        let mut table = StubTable::with_options(self.options);
        for stub in self.stubs {
            let endpoint = stub.to_endpoint();
            table.push(endpoint, stub);
        }
        let analysis = table.analyze();
        (table, analysis)
    }
}

// Variant order matters: integers that do not fit i64 must land in
// `Unsigned` before serde falls back to `Float`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    /// The value as it will be compared. Fractional numbers have no exact
    /// textual form once parsed, so they are rejected.
    fn into_text(self) -> Result<String, f64> {
        match self {
            ScalarValue::String(s) => Ok(s),
            ScalarValue::Integer(i) => Ok(i.to_string()),
            ScalarValue::Unsigned(u) => Ok(u.to_string()),
            ScalarValue::Float(f) => Err(f),
            ScalarValue::Bool(b) => Ok(b.to_string()),
        }
    }
}

fn deserialize_query<'de, D>(deserializer: D) -> Result<QueryParams, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ScalarValue>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| match value.into_text() {
            Ok(text) => Ok((name, text)),
            Err(number) => Err(D::Error::custom(format!(
                "query parameter '{name}' has the fractional number {number}; \
                 quote it so it is matched as written"
            ))),
        })
        .collect()
}
