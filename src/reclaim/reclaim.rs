//! # Core reclamation trait
//!
//! `Reclaim` is the extension point for recycling message payloads once
//! every consumer in a message's snapshot has received it. The queue calls
//! it **exactly once per published message**, from a dispatcher-owned
//! barrier task.
//!
//! ## Contract
//! - Implementations may be slow (I/O, pooling, batching) — a slow
//!   reclaimer delays the reclamation of *that* message only, never the
//!   dispatcher or other messages.
//! - Panics inside the reclaimer are caught and logged; they do not tear
//!   down the queue.
//!
//! ## Example (skeleton)
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use fanoutq::Reclaim;
//!
//! struct PoolReturn;
//!
//! #[async_trait]
//! impl Reclaim<Vec<u8>> for PoolReturn {
//!     async fn reclaim(&self, msg: Arc<Vec<u8>>) {
//!         // return buffer to a pool...
//!         let _ = msg;
//!     }
//!     fn name(&self) -> &str { "pool_return" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

/// Contract for message reclamation.
///
/// Called from a dispatcher-owned barrier task once all of a message's
/// delivery obligations have settled. Implementations should avoid blocking
/// the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Reclaim<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Reclaim a single fully-delivered message.
    ///
    /// The queue hands over its last reference; consumers that are still
    /// holding the message keep it alive through their own `Arc` clones.
    async fn reclaim(&self, msg: Arc<T>);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a reclaimer (`Arc<dyn Reclaim<T>>`).
pub type ReclaimerRef<T> = Arc<dyn Reclaim<T>>;
