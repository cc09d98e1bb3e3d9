//! # Queue configuration.
//!
//! Provides [`QueueConfig`] centralized settings for a [`Queue`](crate::Queue).
//!
//! ## Sentinel values
//! - `input_capacity` and `consumer_capacity` are clamped to a minimum of 1
//!   (tokio channels cannot be unbuffered).
//! - `grace = 0s` → shutdown does not wait for outstanding deliveries and
//!   force-terminates them immediately.

use std::time::Duration;

/// Configuration for a fan-out queue.
///
/// Defines:
/// - **Input buffering**: how many published messages may sit in the input
///   stream before `publish` blocks.
/// - **Consumer defaults**: the buffer capacity used by
///   [`Queue::attach_default`](crate::Queue::attach_default).
/// - **Shutdown behavior**: grace period for draining outstanding
///   deliveries and reclamations.
///
/// ## Notes
/// All fields are public for flexibility. Prefer the `*_clamped` accessors
/// over reading fields directly to avoid sprinkling minimum-capacity checks
/// across the codebase.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Capacity of the input stream buffer.
    ///
    /// `publish` blocks once this many messages are waiting for the
    /// dispatcher. Clamped to a minimum of 1.
    pub input_capacity: usize,

    /// Default per-consumer buffer capacity, used by `attach_default`.
    ///
    /// A consumer whose buffer is full blocks *its own* deliveries (and the
    /// reclamation of the blocked messages) without affecting other
    /// consumers or the dispatcher. Clamped to a minimum of 1.
    pub consumer_capacity: usize,

    /// Maximum time `shutdown` waits for outstanding deliveries and
    /// reclamations to finish before force-terminating them.
    ///
    /// When exceeded, `shutdown` returns
    /// [`QueueError::GraceExceeded`](crate::QueueError::GraceExceeded).
    pub grace: Duration,
}

impl QueueConfig {
    /// Returns the input capacity clamped to a minimum of 1.
    #[inline]
    pub fn input_capacity_clamped(&self) -> usize {
        self.input_capacity.max(1)
    }

    /// Returns the default consumer capacity clamped to a minimum of 1.
    #[inline]
    pub fn consumer_capacity_clamped(&self) -> usize {
        self.consumer_capacity.max(1)
    }
}

impl Default for QueueConfig {
    /// Default configuration:
    ///
    /// - `input_capacity = 16` (small buffer between producers and the dispatcher)
    /// - `consumer_capacity = 1` (tightest bound tokio allows; deliveries
    ///   rendezvous with the consumer as closely as possible)
    /// - `grace = 60s` (reasonable drain window on shutdown)
    fn default() -> Self {
        Self {
            input_capacity: 16,
            consumer_capacity: 1,
            grace: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = QueueConfig::default();
        assert_eq!(cfg.input_capacity, 16);
        assert_eq!(cfg.consumer_capacity, 1);
        assert_eq!(cfg.grace, Duration::from_secs(60));
    }

    #[test]
    fn test_capacities_clamped_to_one() {
        let cfg = QueueConfig {
            input_capacity: 0,
            consumer_capacity: 0,
            grace: Duration::ZERO,
        };
        assert_eq!(cfg.input_capacity_clamped(), 1);
        assert_eq!(cfg.consumer_capacity_clamped(), 1);
    }

    #[test]
    fn test_clamp_preserves_larger_values() {
        let cfg = QueueConfig {
            input_capacity: 128,
            consumer_capacity: 8,
            ..QueueConfig::default()
        };
        assert_eq!(cfg.input_capacity_clamped(), 128);
        assert_eq!(cfg.consumer_capacity_clamped(), 8);
    }
}
