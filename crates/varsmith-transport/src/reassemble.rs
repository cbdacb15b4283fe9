//! Receiving side of the chunk protocol.

use tracing::debug;

use crate::chunk::Artifact;
use crate::error::TransportError;
use crate::message::Message;

#[derive(Debug)]
enum State {
    Idle,
    Receiving {
        filename: String,
        mime: String,
        total: usize,
        next: usize,
        data: String,
    },
}

/// Rebuilds artifacts from a message stream.
///
/// Feed every inbound message to [`accept`](Reassembler::accept); it returns
/// the artifact once `EXPORT_END` closes a complete transfer. Protocol
/// violations are errors and reset the reassembler.
#[derive(Debug)]
pub struct Reassembler {
    state: State,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembler {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Whether a transfer is in progress.
    pub fn is_receiving(&self) -> bool {
        matches!(self.state, State::Receiving { .. })
    }

    pub fn accept(&mut self, message: Message) -> Result<Option<Artifact>, TransportError> {
        let result = self.step(message);
        if result.is_err() {
            self.state = State::Idle;
        }
        result
    }

    fn step(&mut self, message: Message) -> Result<Option<Artifact>, TransportError> {
        match message {
            Message::UiReady => Ok(None),
            Message::Error { message } => Err(TransportError::Remote(message)),
            Message::ExportBegin {
                total_chunks,
                filename,
                mime,
            } => {
                if self.is_receiving() {
                    return Err(TransportError::UnexpectedMessage {
                        expected: "EXPORT_CHUNK or EXPORT_END",
                        found: "EXPORT_BEGIN",
                    });
                }
                debug!(%filename, total_chunks, "receiving artifact");
                self.state = State::Receiving {
                    filename,
                    mime,
                    total: total_chunks,
                    next: 0,
                    data: String::new(),
                };
                Ok(None)
            }
            Message::ExportChunk { index, data: chunk } => {
                let State::Receiving {
                    total, next, data, ..
                } = &mut self.state
                else {
                    return Err(TransportError::UnexpectedMessage {
                        expected: "EXPORT_BEGIN",
                        found: "EXPORT_CHUNK",
                    });
                };
                if index != *next {
                    return Err(TransportError::OutOfOrder {
                        expected: *next,
                        found: index,
                    });
                }
                if index >= *total {
                    return Err(TransportError::TooManyChunks {
                        index,
                        total: *total,
                    });
                }
                data.push_str(&chunk);
                *next += 1;
                Ok(None)
            }
            Message::ExportEnd => match std::mem::replace(&mut self.state, State::Idle) {
                State::Idle => Err(TransportError::UnexpectedMessage {
                    expected: "EXPORT_BEGIN",
                    found: "EXPORT_END",
                }),
                State::Receiving {
                    filename,
                    mime,
                    total,
                    next,
                    data,
                } => {
                    if next != total {
                        return Err(TransportError::Incomplete {
                            received: next,
                            expected: total,
                        });
                    }
                    Ok(Some(Artifact {
                        filename,
                        mime,
                        data,
                    }))
                }
            },
        }
    }

    /// Ends the stream. Fails if a transfer was left open.
    pub fn finish(self) -> Result<(), TransportError> {
        match self.state {
            State::Idle => Ok(()),
            State::Receiving { total, next, .. } => Err(TransportError::Incomplete {
                received: next,
                expected: total,
            }),
        }
    }
}
