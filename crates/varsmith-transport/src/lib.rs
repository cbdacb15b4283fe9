//! # Varsmith Transport - Chunked Artifact Delivery
//!
//! Export artifacts can be large, and message channels between a host and
//! its UI often limit message size. This crate moves artifacts as a short
//! sequence of JSON messages:
//!
//! 1. `EXPORT_BEGIN` announcing the chunk count, filename and MIME type
//! 2. `EXPORT_CHUNK` messages carrying at most `chunk_size` bytes each
//! 3. `EXPORT_END`
//!
//! A failed run sends a single `ERROR` message instead.
//!
//! ## Pieces
//!
//! - [`Message`]: the wire messages
//! - [`send_artifact`] / [`split_chunks`]: the sending side
//! - [`Reassembler`]: the receiving side, validating order and counts
//! - [`Outbox`]: holds messages until the receiver signals `UI_READY`
//! - [`DirectorySink`]: a receiving [`Transport`] that writes files
//!
//! ## Example
//!
//! ```rust
//! use varsmith_transport::{send_artifact, Artifact, Message, Reassembler};
//!
//! let artifact = Artifact::new("tokens.json", "application/json", "{\"core\": {}}");
//! let mut wire: Vec<Message> = Vec::new();
//! send_artifact(&mut wire, &artifact, 5).unwrap();
//!
//! let mut reassembler = Reassembler::new();
//! let mut received = None;
//! for message in wire {
//!     if let Some(done) = reassembler.accept(message).unwrap() {
//!         received = Some(done);
//!     }
//! }
//! assert_eq!(received, Some(artifact));
//! ```

mod chunk;
mod error;
mod message;
mod outbox;
mod reassemble;
mod sink;

pub use chunk::{send_artifact, send_error, split_chunks, Artifact, Transport, DEFAULT_CHUNK_SIZE};
pub use error::TransportError;
pub use message::Message;
pub use outbox::Outbox;
pub use reassemble::Reassembler;
pub use sink::{is_plain_filename, DirectorySink};
