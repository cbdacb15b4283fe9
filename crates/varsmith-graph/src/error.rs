//! Error types for graph loading and access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying a variable graph.
///
/// These are the catastrophic failures of a run: a snapshot that cannot be
/// read or parsed, or a literal that contradicts its variable's declared
/// type. Missing aliases and cycles are not graph errors; the resolver
/// handles those.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Failed to read a snapshot from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON snapshot could not be parsed.
    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML snapshot could not be parsed.
    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Snapshot file extension is not one of the supported formats.
    #[error("unsupported snapshot format '{}' (expected one of: {expected})", .path.display())]
    UnsupportedFormat { path: PathBuf, expected: String },

    /// A literal does not match the variable's declared type.
    #[error("variable '{variable}' mode '{mode}': expected a {expected} literal, got {actual}")]
    TypeMismatch {
        variable: String,
        mode: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A color string that is not valid hex.
    #[error("invalid hex color '{value}'")]
    InvalidColor { value: String },

    /// Accessor backend failure (for non-file sources).
    #[error("graph source failed: {0}")]
    Source(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
