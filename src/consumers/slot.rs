//! # Delivery slot: the write side of one consumer.
//!
//! Each attached consumer is backed by a [`DeliverySlot`]: an unbounded
//! FIFO of pending deliveries plus a dedicated worker task that drains the
//! FIFO and writes sequentially into the consumer's bounded buffer.
//!
//! ## Diagram
//! ```text
//!   dispatcher ──send(Delivery)──► [pending FIFO] ──► worker ──send──► [bounded buffer] ──► Consumer
//! ```
//!
//! ## Rules
//! - **Per-handle ordering**: the single worker drains the FIFO in
//!   dispatcher order, so one consumer always observes messages in publish
//!   order even though per-message fan-outs are concurrent.
//! - **Backpressure is local**: a full consumer buffer blocks this slot's
//!   worker only; other slots and the dispatcher keep advancing.
//! - **Safe close**: the worker is the *sole* owner of the buffer's send
//!   side and drops it strictly after the FIFO is drained. No delivery can
//!   ever race the close.
//! - **Completion tokens**: every [`Delivery`] carries a token for its
//!   message's barrier. The token is released when the delivery settles —
//!   written, skipped (consumer gone), or dropped with the slot.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// One unit of fan-out work: a message plus the completion token of that
/// message's barrier.
///
/// Dropping the token (in any way) counts the delivery as settled.
pub(crate) struct Delivery<T> {
    pub(crate) msg: Arc<T>,
    pub(crate) done: mpsc::Sender<()>,
}

/// Write side of an attached consumer, owned by the registry.
pub(crate) struct DeliverySlot<T> {
    id: u64,
    pending: mpsc::UnboundedSender<Delivery<T>>,
    worker: JoinHandle<()>,
}

impl<T> DeliverySlot<T>
where
    T: Send + Sync + 'static,
{
    /// Spawns the slot's worker and returns the slot together with the
    /// receiving end handed to the external consumer.
    ///
    /// `capacity` is clamped to a minimum of 1. `stop` is only fired on a
    /// grace-exceeded shutdown; the cooperative close path is dropping the
    /// slot (which closes the pending FIFO).
    pub(crate) fn spawn(
        id: u64,
        capacity: usize,
        stop: CancellationToken,
    ) -> (Self, mpsc::Receiver<Arc<T>>) {
        let (buffer_tx, buffer_rx) = mpsc::channel::<Arc<T>>(capacity.max(1));
        let (pending_tx, pending_rx) = mpsc::unbounded_channel::<Delivery<T>>();
        let worker = tokio::spawn(deliver_loop(pending_rx, buffer_tx, stop));
        (
            Self {
                id,
                pending: pending_tx,
                worker,
            },
            buffer_rx,
        )
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Clones the pending-FIFO sender for a registry snapshot.
    ///
    /// A send on a lane whose worker is already gone drops the delivery,
    /// which releases its completion token — the "safely skipped" arm of
    /// the detach contract.
    pub(crate) fn lane(&self) -> mpsc::UnboundedSender<Delivery<T>> {
        self.pending.clone()
    }

    /// Force-terminates the worker. Only used after the shutdown grace
    /// window has been exceeded.
    pub(crate) fn abort(&self) {
        self.worker.abort();
    }
}

/// Drains the pending FIFO into the consumer's bounded buffer, one
/// delivery at a time.
///
/// Exits when the FIFO is closed *and* drained (detach or queue shutdown),
/// or when `stop` fires. The buffer sender is dropped on exit, which is
/// what ends the consumer's stream.
async fn deliver_loop<T>(
    mut pending: mpsc::UnboundedReceiver<Delivery<T>>,
    buffer: mpsc::Sender<Arc<T>>,
    stop: CancellationToken,
) {
    loop {
        let delivery = tokio::select! {
            _ = stop.cancelled() => break,
            next = pending.recv() => match next {
                Some(delivery) => delivery,
                None => break,
            },
        };

        let Delivery { msg, done } = delivery;
        tokio::select! {
            _ = stop.cancelled() => break,
            // Err means the consumer dropped its receiver: skip silently.
            _ = buffer.send(msg) => {}
        }
        drop(done);
    }
}
