//! Buffering until the receiver is ready.

use std::collections::VecDeque;

use tracing::debug;

use crate::chunk::Transport;
use crate::error::TransportError;
use crate::message::Message;

/// Wraps a transport and holds outbound messages until the receiver sends
/// `UI_READY`, then flushes them in order.
///
/// ```rust
/// use varsmith_transport::{Message, Outbox, Transport};
///
/// let mut outbox = Outbox::new(Vec::new());
/// outbox.send(Message::ExportEnd).unwrap();
/// assert_eq!(outbox.pending(), 1);
///
/// outbox.receive(&Message::UiReady).unwrap();
/// assert_eq!(outbox.into_inner(), vec![Message::ExportEnd]);
/// ```
#[derive(Debug)]
pub struct Outbox<T: Transport> {
    inner: T,
    ready: bool,
    queue: VecDeque<Message>,
}

impl<T: Transport> Outbox<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            ready: false,
            queue: VecDeque::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of buffered messages.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Marks the receiver ready and flushes the buffer. Returns the number
    /// of messages flushed.
    pub fn mark_ready(&mut self) -> Result<usize, TransportError> {
        self.ready = true;
        let mut flushed = 0;
        while let Some(message) = self.queue.pop_front() {
            self.inner.send(message)?;
            flushed += 1;
        }
        if flushed > 0 {
            debug!(flushed, "flushed outbox");
        }
        Ok(flushed)
    }

    /// Handles an inbound message. Returns `true` if it was the readiness
    /// signal, which the outbox consumes.
    pub fn receive(&mut self, message: &Message) -> Result<bool, TransportError> {
        if *message == Message::UiReady {
            self.mark_ready()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for Outbox<T> {
    fn send(&mut self, message: Message) -> Result<(), TransportError> {
        if self.ready {
            self.inner.send(message)
        } else {
            self.queue.push_back(message);
            Ok(())
        }
    }
}
