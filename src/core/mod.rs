//! Queue core: dispatch and lifecycle.
//!
//! The public API from this module is [`Queue`] and [`QueueConfig`]; the
//! rest is internal wiring.
//!
//! Internal modules:
//! - [`queue`]: public handle — publish, attach/detach, shutdown;
//! - [`dispatcher`]: broadcaster loop and per-message completion barriers;
//! - [`registry`]: locked set of delivery slots with copy-out snapshots;
//! - [`config`]: runtime settings and defaults.

mod config;
mod dispatcher;
mod queue;
mod registry;

pub use config::QueueConfig;
pub use queue::Queue;
