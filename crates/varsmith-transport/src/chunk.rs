//! Splitting artifacts into chunk messages.
//!
//! Large payloads are sent as `EXPORT_BEGIN`, one `EXPORT_CHUNK` per slice
//! and `EXPORT_END`. Slices never split a UTF-8 character, so every chunk is
//! valid text and concatenating them in index order restores the payload.
//!
//! ```rust
//! use varsmith_transport::{send_artifact, Artifact, Message};
//!
//! let artifact = Artifact::new("tokens.json", "application/json", "{\"core\":{}}");
//! let mut sent: Vec<Message> = Vec::new();
//! let chunks = send_artifact(&mut sent, &artifact, 4).unwrap();
//!
//! assert_eq!(chunks, 3);
//! assert_eq!(sent.len(), 5);
//! assert_eq!(sent.last(), Some(&Message::ExportEnd));
//! ```

use tracing::debug;

use crate::error::TransportError;
use crate::message::Message;

/// Default chunk size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Anything that accepts outbound messages.
pub trait Transport {
    fn send(&mut self, message: Message) -> Result<(), TransportError>;
}

/// Collects messages in memory.
impl Transport for Vec<Message> {
    fn send(&mut self, message: Message) -> Result<(), TransportError> {
        self.push(message);
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, message: Message) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

/// A named payload to transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime: String,
    pub data: String,
}

impl Artifact {
    pub fn new(
        filename: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }
}

/// Splits `payload` into slices of at most `chunk_size` bytes, on character
/// boundaries.
///
/// A character wider than `chunk_size` gets a slice of its own. An empty
/// payload yields no slices.
///
/// # Errors
///
/// Returns [`TransportError::InvalidChunkSize`] when `chunk_size` is zero.
pub fn split_chunks(payload: &str, chunk_size: usize) -> Result<Vec<&str>, TransportError> {
    if chunk_size == 0 {
        return Err(TransportError::InvalidChunkSize);
    }

    let mut chunks = Vec::with_capacity(payload.len() / chunk_size + 1);
    let mut start = 0;
    while start < payload.len() {
        let mut end = (start + chunk_size).min(payload.len());
        while !payload.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // Single character wider than the chunk size
            end = start + 1;
            while !payload.is_char_boundary(end) {
                end += 1;
            }
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    Ok(chunks)
}

/// Sends `artifact` as begin, chunk and end messages. Returns the number of
/// chunks sent.
pub fn send_artifact<T>(
    transport: &mut T,
    artifact: &Artifact,
    chunk_size: usize,
) -> Result<usize, TransportError>
where
    T: Transport + ?Sized,
{
    let chunks = split_chunks(&artifact.data, chunk_size)?;
    debug!(
        filename = %artifact.filename,
        bytes = artifact.data.len(),
        chunks = chunks.len(),
        "sending artifact"
    );

    transport.send(Message::ExportBegin {
        total_chunks: chunks.len(),
        filename: artifact.filename.clone(),
        mime: artifact.mime.clone(),
    })?;
    for (index, data) in chunks.iter().enumerate() {
        transport.send(Message::ExportChunk {
            index,
            data: (*data).to_string(),
        })?;
    }
    transport.send(Message::ExportEnd)?;
    Ok(chunks.len())
}

/// Reports a failed run.
pub fn send_error<T>(transport: &mut T, message: impl Into<String>) -> Result<(), TransportError>
where
    T: Transport + ?Sized,
{
    transport.send(Message::error(message))
}
