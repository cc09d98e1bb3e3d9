//! # Dispatcher: the broadcaster worker.
//!
//! A single task drains the input stream strictly in publish order. For
//! each message it snapshots the registry (copy-out under the lock),
//! enqueues one delivery per snapshotted slot, and spawns an independent
//! completion barrier that invokes the reclaimer once every delivery has
//! settled.
//!
//! ## Diagram
//! ```text
//! [input mpsc] ──► loop {
//!     snapshot registry           (lock held for the copy only)
//!     enqueue Delivery per lane   (never blocks: lanes are unbounded FIFOs)
//!     spawn completion barrier    (per message, independent)
//! }
//! barrier: all tokens dropped ──► reclaim(msg)   (exactly once)
//! ```
//!
//! ## Rules
//! - The loop never awaits a delivery: slow consumers delay reclamation of
//!   *their* messages, not the stream.
//! - The completion barrier is the tokio wait-group idiom: each delivery
//!   holds a clone of an `mpsc::Sender<()>`; when the last clone drops, the
//!   barrier's `recv()` yields `None`. An empty snapshot drops the last
//!   clone immediately, so reclamation fires without delay.
//! - Reclaimer panics are caught and logged (isolation), mirroring the
//!   worker-side panic handling elsewhere in the crate.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::consumers::Delivery;
use crate::core::registry::Registry;
use crate::error::QueueError;
use crate::reclaim::ReclaimerRef;

/// Single-consumer worker over the queue's input stream.
pub(crate) struct Dispatcher<T> {
    registry: Arc<Registry<T>>,
    reclaimer: ReclaimerRef<T>,
    stop: CancellationToken,
    grace: Duration,
}

impl<T> Dispatcher<T>
where
    T: Send + Sync + 'static,
{
    pub(crate) fn new(
        registry: Arc<Registry<T>>,
        reclaimer: ReclaimerRef<T>,
        stop: CancellationToken,
        grace: Duration,
    ) -> Self {
        Self {
            registry,
            reclaimer,
            stop,
            grace,
        }
    }

    /// Runs until the input stream closes, then drains the pipeline.
    ///
    /// Returns [`QueueError::GraceExceeded`] if outstanding deliveries did
    /// not settle within the grace window.
    pub(crate) async fn run(self, mut input: mpsc::Receiver<T>) -> Result<(), QueueError> {
        let mut barriers: JoinSet<()> = JoinSet::new();

        while let Some(msg) = input.recv().await {
            // Reap barriers that already finished so the set stays small.
            while barriers.try_join_next().is_some() {}

            let msg = Arc::new(msg);
            let lanes = self.registry.snapshot().await;

            let (done_tx, done_rx) = mpsc::channel::<()>(1);
            for lane in &lanes {
                let _ = lane.send(Delivery {
                    msg: Arc::clone(&msg),
                    done: done_tx.clone(),
                });
            }
            // The dispatcher's own token must not keep the barrier waiting.
            drop(done_tx);

            let reclaimer = Arc::clone(&self.reclaimer);
            barriers.spawn(completion_barrier(done_rx, reclaimer, msg));
        }

        self.drain(barriers).await
    }

    /// Closes every remaining handle and waits (up to `grace`) for all
    /// outstanding reclamations.
    async fn drain(self, mut barriers: JoinSet<()>) -> Result<(), QueueError> {
        // Dropping the slots closes their pending FIFOs; workers finish
        // their in-flight deliveries and end each consumer's stream. The
        // slots are kept so they can be force-terminated on timeout.
        let slots = self.registry.drain_all().await;

        let done = async {
            while barriers.join_next().await.is_some() {}
        };
        let timed = tokio::time::timeout(self.grace, done).await;
        match timed {
            Ok(()) => Ok(()),
            Err(_) => {
                // Reap barriers that finished during the wait so `pending`
                // counts only messages that were truly never reclaimed.
                while barriers.try_join_next().is_some() {}
                let pending = barriers.len();
                // Abort the barriers before cancelling workers: a cancelled
                // worker drops its completion tokens, and a still-live
                // barrier would read that as full delivery and reclaim a
                // message that was never delivered.
                barriers.abort_all();
                self.stop.cancel();
                for slot in &slots {
                    slot.abort();
                }
                Err(QueueError::GraceExceeded {
                    grace: self.grace,
                    pending,
                })
            }
        }
    }
}

/// Waits until every delivery for one message has settled, then invokes
/// the reclaimer exactly once.
async fn completion_barrier<T>(
    mut done_rx: mpsc::Receiver<()>,
    reclaimer: ReclaimerRef<T>,
    msg: Arc<T>,
) where
    T: Send + Sync + 'static,
{
    // Tokens are only ever dropped, never sent on; `None` means the last
    // delivery has settled.
    while done_rx.recv().await.is_some() {}

    let result = AssertUnwindSafe(reclaimer.reclaim(msg)).catch_unwind().await;
    if let Err(panic_err) = result {
        eprintln!(
            "[fanoutq] reclaimer '{}' panicked: {:?}",
            reclaimer.name(),
            panic_err
        );
    }
}
