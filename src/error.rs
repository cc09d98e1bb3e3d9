//! Error types used by the fan-out queue.
//!
//! [`QueueError`] covers the two failure families the queue can surface to
//! callers:
//!
//! - **Misuse of a closed queue** — publishing to or attaching on a queue
//!   whose input stream has been shut down ([`QueueError::Closed`]).
//! - **Shutdown timeout** — the drain phase of [`Queue::shutdown`](crate::Queue::shutdown)
//!   exceeded its grace window and outstanding deliveries had to be
//!   force-terminated ([`QueueError::GraceExceeded`]).
//!
//! Backpressure (a full input or consumer buffer) is **not** an error: the
//! affected operation blocks until space frees up.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the fan-out queue.
///
/// These represent contract violations or shutdown failures, never ordinary
/// backpressure (which blocks instead of failing).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum QueueError {
    /// The queue's input stream has been closed; no further publishes or
    /// attaches are accepted.
    #[error("queue is closed")]
    Closed,

    /// Shutdown grace period was exceeded; some messages could not finish
    /// delivery and their reclamation was force-terminated.
    #[error("shutdown grace {grace:?} exceeded; {pending} message(s) unreclaimed; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of messages whose reclamation never fired.
        pending: usize,
    },
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanoutq::QueueError;
    ///
    /// assert_eq!(QueueError::Closed.as_label(), "queue_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Closed => "queue_closed",
            QueueError::GraceExceeded { .. } => "queue_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            QueueError::Closed => "queue closed".to_string(),
            QueueError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; unreclaimed messages={pending}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(QueueError::Closed.as_label(), "queue_closed");
        let err = QueueError::GraceExceeded {
            grace: Duration::from_secs(5),
            pending: 3,
        };
        assert_eq!(err.as_label(), "queue_grace_exceeded");
    }

    #[test]
    fn test_messages_mention_details() {
        let err = QueueError::GraceExceeded {
            grace: Duration::from_secs(5),
            pending: 3,
        };
        assert!(err.as_message().contains("unreclaimed messages=3"));
        assert!(QueueError::Closed.as_message().contains("closed"));
    }
}
