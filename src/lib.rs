//! # fanoutq
//!
//! **fanoutq** is a single-process, in-memory fan-out queue: one logical
//! input stream is replicated to a dynamically changing set of independent
//! consumers, each receiving every message published after it attached.
//! Once every consumer in a message's snapshot has received it, an
//! externally supplied reclaimer is invoked exactly once so the producer
//! side can recycle or free the payload.
//!
//! ## Architecture
//! ```text
//!  Producer(s)
//!      │ publish(msg)            (blocks when the input buffer is full)
//!      ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Queue                                                            │
//! │  - input mpsc (bounded)                                           │
//! │  - Registry (locked slot set, copy-out snapshots)                 │
//! │  - Dispatcher (single worker, drains input in publish order)      │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ per message: snapshot + fan-out + barrier
//!        │
//!        ├──► slot H1: [pending FIFO] ─► worker ─► [buffer] ─► Consumer H1
//!        ├──► slot H2: [pending FIFO] ─► worker ─► [buffer] ─► Consumer H2
//!        ├──► slot HN: [pending FIFO] ─► worker ─► [buffer] ─► Consumer HN
//!        │
//!        └──► completion barrier (per message)
//!                 └─ all deliveries settled ─► Reclaim::reclaim(msg)
//! ```
//!
//! ## Guarantees
//! - **Publish order per consumer**: each slot's worker serializes
//!   deliveries, so one consumer always observes messages in publish order.
//! - **Snapshot semantics**: a consumer attached after a message's
//!   snapshot never receives it; one detached after the snapshot either
//!   still receives it (in-flight) or is safely skipped — never
//!   attempted-and-failed.
//! - **Exactly-once reclamation**: per message, after its last delivery
//!   settles; immediately when nobody is attached.
//! - **Local backpressure**: a slow consumer delays reclamation of *its*
//!   messages only; the dispatcher and other consumers keep advancing.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fanoutq::{Queue, ReclaimFn, ReclaimerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reclaimer: called once per message after full delivery.
//!     let reclaimer: ReclaimerRef<String> = ReclaimFn::arc("recycler", |msg: Arc<String>| {
//!         let _ = msg; // return to a pool, free, log, ...
//!     });
//!
//!     let queue = Queue::new(reclaimer);
//!
//!     let mut consumer = queue.attach(8).await?;
//!     queue.publish("hello".to_string()).await?;
//!
//!     let msg = consumer.recv().await.expect("stream still open");
//!     assert_eq!(msg.as_str(), "hello");
//!
//!     queue.shutdown().await?;
//!     assert!(consumer.recv().await.is_none());
//!     Ok(())
//! }
//! ```
//!
//! ## Non-goals
//! Persistence, cross-process delivery, replay to late joiners, per-consumer
//! filtering, and ordering across different consumers are out of scope.

mod consumers;
mod core;
mod error;
mod reclaim;

// ---- Public re-exports ----

pub use consumers::{Consumer, TryRecvError};
pub use core::{Queue, QueueConfig};
pub use error::QueueError;
pub use reclaim::{Reclaim, ReclaimFn, ReclaimerRef};
