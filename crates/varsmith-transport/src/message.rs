//! Wire messages.
//!
//! Messages serialize as JSON objects tagged by `type`:
//!
//! ```json
//! {"type": "EXPORT_BEGIN", "totalChunks": 3, "filename": "tokens.json", "mime": "application/json"}
//! {"type": "EXPORT_CHUNK", "index": 0, "data": "{\"core\": ..."}
//! {"type": "EXPORT_END"}
//! {"type": "ERROR", "message": "failed to read graph"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Starts an artifact transfer of `total_chunks` chunks.
    #[serde(rename_all = "camelCase")]
    ExportBegin {
        total_chunks: usize,
        filename: String,
        mime: String,
    },
    ExportChunk {
        index: usize,
        data: String,
    },
    ExportEnd,
    /// The run failed. No artifact follows.
    Error {
        message: String,
    },
    /// Sent by the receiver once it can accept messages.
    UiReady,
}

impl Message {
    /// The wire tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ExportBegin { .. } => "EXPORT_BEGIN",
            Message::ExportChunk { .. } => "EXPORT_CHUNK",
            Message::ExportEnd => "EXPORT_END",
            Message::Error { .. } => "ERROR",
            Message::UiReady => "UI_READY",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Message::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }
}
