use std::path::PathBuf;

/// Errors raised while loading or validating a stub file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read stub file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Stub {index} has an empty path")]
    EmptyPath { index: usize },
    #[error("Stub {index} path '{path}' contains a query string; list expected parameters under 'query'")]
    QueryInPath { index: usize, path: String },
    #[error("Stub {index} has a query parameter with an empty name")]
    EmptyQueryName { index: usize },
    #[error("Duplicate stub name '{name}'")]
    DuplicateName { name: String },
}
