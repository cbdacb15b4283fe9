//! Error types for token generation.

use thiserror::Error;
use varsmith_graph::GraphError;

use crate::classify::Category;
use crate::resolve::MissingReason;

/// Errors that abort a token export.
///
/// Per-variable problems (dangling aliases, cycles, unclassifiable names)
/// only become errors under the strict policies; by default they are logged
/// and the offending leaf is skipped.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The graph accessor failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A reference could not be resolved and the resolve policy is strict.
    #[error("unresolved value for '{variable}' in mode '{mode}': {reason}")]
    Unresolved {
        variable: String,
        mode: String,
        reason: MissingReason,
    },

    /// Two variables normalized to the same key and the collision policy is `fail`.
    #[error("{category} key '{key}' is produced by both '{first}' and '{second}'")]
    KeyCollision {
        category: Category,
        key: String,
        first: String,
        second: String,
    },

    /// Token payload could not be serialized.
    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
