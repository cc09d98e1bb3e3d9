//! # Consumer handle: the read side of one attachment.
//!
//! [`Consumer`] is returned by [`Queue::attach`](crate::Queue::attach). It
//! yields every message published after the attach, in publish order, until
//! the handle is detached (and drained) or the queue shuts down.

use std::sync::Arc;

use tokio::sync::mpsc;

pub use tokio::sync::mpsc::error::TryRecvError;

/// Read side of an attached consumer.
///
/// Messages appear as `Arc<T>`: every consumer in a message's snapshot
/// (and the reclaimer) observes the same allocation.
///
/// The stream ends (`recv` returns `None`) once the handle has been
/// detached and its in-flight deliveries drained, or once the queue has
/// shut down and drained.
pub struct Consumer<T> {
    id: u64,
    rx: mpsc::Receiver<Arc<T>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(id: u64, rx: mpsc::Receiver<Arc<T>>) -> Self {
        Self { id, rx }
    }

    /// Identity of this attachment, unique per queue.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Receives the next message, waiting if none is buffered.
    ///
    /// Returns `None` once the handle is closed and fully drained. Reading
    /// frees buffer space, which unblocks this handle's pending deliveries
    /// (and, transitively, the reclamation of the blocked messages).
    pub async fn recv(&mut self) -> Option<Arc<T>> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`Consumer::recv`].
    pub fn try_recv(&mut self) -> Result<Arc<T>, TryRecvError> {
        self.rx.try_recv()
    }
}
