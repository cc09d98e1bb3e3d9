//! # Queue: the public fan-out handle.
//!
//! [`Queue`] owns the input stream, the subscriber registry, and the
//! dispatcher task. It is the single entry point for publishing, attaching
//! and detaching consumers, and shutting the pipeline down.
//!
//! ## High-level architecture
//! ```text
//! publish(msg) ──► [input mpsc] ──► Dispatcher (one task, publish order)
//!                                      │ snapshot registry (copy-out)
//!                                      ├──► slot H1: pending FIFO ─► worker ─► [buffer] ─► Consumer H1
//!                                      ├──► slot H2: pending FIFO ─► worker ─► [buffer] ─► Consumer H2
//!                                      └──► barrier (per message) ─► reclaim(msg) exactly once
//!
//! attach(cap)  ──► new slot registered; sees only later messages
//! detach(&c)   ──► slot removed; in-flight deliveries drain, then stream ends
//! shutdown()   ──► input closed ─► dispatcher drains ─► all handles closed
//!                  ─► barriers awaited up to `grace`
//! ```
//!
//! ## Ordering guarantees
//! 1. Messages are dispatched in publish order (single input consumer).
//! 2. One consumer observes messages in that same relative order (its slot
//!    worker serializes deliveries).
//! 3. No ordering across different consumers.
//! 4. A consumer attached after a message's snapshot never receives it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::consumers::{Consumer, DeliverySlot};
use crate::core::config::QueueConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::registry::Registry;
use crate::error::QueueError;
use crate::reclaim::ReclaimerRef;

/// In-memory fan-out queue with exactly-once message reclamation.
///
/// Every consumer attached at publish time receives the message (as
/// `Arc<T>`); once all of them have, the reclaimer runs. Cheap to share
/// behind an `Arc` across producers and controllers.
///
/// ### Notes
/// - Construction spawns the dispatcher task and therefore must happen
///   inside a tokio runtime.
/// - Dropping the queue without calling [`Queue::shutdown`] still drains
///   the pipeline (closing the input has the same effect), but gives no
///   way to observe a drain timeout.
pub struct Queue<T> {
    cfg: QueueConfig,
    registry: Arc<Registry<T>>,
    /// `None` once shut down. Guarded so close serializes with publish and
    /// attach (an attach that passed the closed check completes its
    /// registration before the input can close).
    input: Mutex<Option<mpsc::Sender<T>>>,
    dispatcher: Mutex<Option<JoinHandle<Result<(), QueueError>>>>,
    stop: CancellationToken,
    next_id: AtomicU64,
}

impl<T> Queue<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a queue with [`QueueConfig::default`].
    ///
    /// The reclaimer is called exactly once per published message, after
    /// every consumer in that message's snapshot has received it.
    pub fn new(reclaimer: ReclaimerRef<T>) -> Self {
        Self::with_config(reclaimer, QueueConfig::default())
    }

    /// Like [`Queue::new`] but with explicit configuration.
    pub fn with_config(reclaimer: ReclaimerRef<T>, cfg: QueueConfig) -> Self {
        let (input_tx, input_rx) = mpsc::channel::<T>(cfg.input_capacity_clamped());
        let registry = Registry::new();
        let stop = CancellationToken::new();

        let dispatcher = Dispatcher::new(
            Arc::clone(&registry),
            reclaimer,
            stop.clone(),
            cfg.grace,
        );
        let handle = tokio::spawn(dispatcher.run(input_rx));

        Self {
            cfg,
            registry,
            input: Mutex::new(Some(input_tx)),
            dispatcher: Mutex::new(Some(handle)),
            stop,
            next_id: AtomicU64::new(0),
        }
    }

    /// Publishes a message into the input stream.
    ///
    /// Blocks while the input buffer is full (bounded backpressure).
    /// Returns [`QueueError::Closed`] if the queue has been shut down.
    pub async fn publish(&self, msg: T) -> Result<(), QueueError> {
        let tx = { self.input.lock().await.clone() };
        let Some(tx) = tx else {
            return Err(QueueError::Closed);
        };
        tx.send(msg).await.map_err(|_| QueueError::Closed)
    }

    /// Attaches a new consumer with the given buffer capacity (min 1).
    ///
    /// Only messages published after this call returns are guaranteed
    /// visible to the consumer; messages already snapshotted without it are
    /// never delivered to it.
    pub async fn attach(&self, capacity: usize) -> Result<Consumer<T>, QueueError> {
        // Hold the input lock across registration so a concurrent shutdown
        // cannot close the queue between the check and the insert.
        let input = self.input.lock().await;
        if input.is_none() {
            return Err(QueueError::Closed);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (slot, rx) = DeliverySlot::spawn(id, capacity, self.stop.child_token());
        self.registry.add(slot).await;
        drop(input);

        Ok(Consumer::new(id, rx))
    }

    /// Attaches with the configured default consumer capacity.
    pub async fn attach_default(&self) -> Result<Consumer<T>, QueueError> {
        self.attach(self.cfg.consumer_capacity_clamped()).await
    }

    /// Detaches a consumer: no future message snapshot will include it.
    ///
    /// Deliveries already dispatched to it keep draining; the consumer's
    /// stream ends (`recv` returns `None`) once they have. Returns `false`
    /// if the handle was already detached (safe no-op).
    pub async fn detach(&self, consumer: &Consumer<T>) -> bool {
        self.registry.remove(consumer.id()).await
    }

    /// Number of currently attached consumers.
    pub async fn attached(&self) -> usize {
        self.registry.len().await
    }

    /// True if at least one consumer is attached.
    pub async fn has_consumers(&self) -> bool {
        !self.registry.is_empty().await
    }

    /// Shuts the queue down: closes the input, drains every published
    /// message through delivery and reclamation, and closes all consumer
    /// streams.
    ///
    /// Waits up to [`QueueConfig::grace`] for outstanding deliveries;
    /// returns [`QueueError::GraceExceeded`] if they did not settle in
    /// time. Idempotent: a second call returns `Ok(())` immediately.
    pub async fn shutdown(&self) -> Result<(), QueueError> {
        {
            // Dropping the sender closes the input stream; the dispatcher
            // finishes the backlog and then drains the registry.
            self.input.lock().await.take();
        }

        let handle = { self.dispatcher.lock().await.take() };
        let Some(handle) = handle else {
            return Ok(());
        };

        match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                eprintln!("[fanoutq] dispatcher task failed: {join_err}");
                Ok(())
            }
        }
    }
}
