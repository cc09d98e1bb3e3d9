//! # Message reclamation.
//!
//! This module provides the [`Reclaim`] trait — the hook the queue invokes
//! exactly once per message, after every consumer in that message's
//! snapshot has received it — and [`ReclaimFn`], a closure adapter for the
//! common case.
//!
//! ## Quick reference
//! - **Caller**: the dispatcher's per-message completion barrier
//!   (`core/dispatcher.rs`).
//! - **Timing**: after the last delivery obligation settles; immediately if
//!   the message's snapshot was empty.
//! - **Isolation**: panics are caught and logged; a slow reclaimer stalls
//!   only its own message's cleanup.

mod reclaim;
mod reclaim_fn;

pub use reclaim::{Reclaim, ReclaimerRef};
pub use reclaim_fn::ReclaimFn;
