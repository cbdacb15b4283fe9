use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while chunking, delivering or reassembling messages.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("unexpected {found} message (expected {expected})")]
    UnexpectedMessage {
        expected: &'static str,
        found: &'static str,
    },

    #[error("chunk {found} arrived out of order (expected {expected})")]
    OutOfOrder { expected: usize, found: usize },

    #[error("chunk {index} exceeds the announced total of {total}")]
    TooManyChunks { index: usize, total: usize },

    #[error("stream ended after {received} of {expected} chunks")]
    Incomplete { received: usize, expected: usize },

    /// The sender reported a failure instead of an artifact.
    #[error("remote error: {0}")]
    Remote(String),

    #[error("refusing to write artifact named '{0}'")]
    InvalidFilename(String),

    #[error("failed to write {}: {source}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),
}
