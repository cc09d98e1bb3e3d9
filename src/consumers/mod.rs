//! # Consumer endpoints.
//!
//! A consumer attachment is split into two halves:
//!
//! - [`Consumer`] — the read side, owned by the subscribing party.
//! - `DeliverySlot` (crate-internal) — the write side, owned by the
//!   registry: a pending FIFO plus a dedicated worker that serializes
//!   deliveries into the consumer's bounded buffer.
//!
//! ## Lifecycle
//! ```text
//! attach ──► slot registered (Active) ──► deliveries flow
//! detach ──► slot removed, FIFO closed ──► worker drains in-flight ──► buffer closed ──► recv() = None
//! ```
//!
//! The buffer is only ever closed by the worker, after the drain — closing
//! can never race a delivery.

mod consumer;
mod slot;

pub use consumer::{Consumer, TryRecvError};

pub(crate) use slot::{Delivery, DeliverySlot};
