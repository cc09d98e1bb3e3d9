//! # Subscriber registry: the attached-consumer set.
//!
//! One mutex guards the whole set; add, remove, and snapshot are mutually
//! atomic. The lock is held only to mutate or copy the map — never across
//! a delivery.
//!
//! ## Rules
//! - `snapshot()` returns a point-in-time copy of the delivery lanes, never
//!   a live view: concurrent attach/detach cannot mutate a snapshot already
//!   handed to the dispatcher.
//! - Removing a slot drops it, which closes its pending FIFO; the slot's
//!   worker drains what is already in flight and then closes the consumer
//!   buffer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::consumers::{Delivery, DeliverySlot};

/// Locked set of delivery slots for currently-attached consumers.
pub(crate) struct Registry<T> {
    slots: Mutex<HashMap<u64, DeliverySlot<T>>>,
}

impl<T> Registry<T>
where
    T: Send + Sync + 'static,
{
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(HashMap::new()),
        })
    }

    /// Registers a slot. Messages snapshotted after this call include it.
    pub(crate) async fn add(&self, slot: DeliverySlot<T>) {
        let mut slots = self.slots.lock().await;
        slots.insert(slot.id(), slot);
    }

    /// Removes a slot by id; dropping it closes the pending FIFO.
    ///
    /// Returns `false` if the id is unknown (already detached), making
    /// detach a safe no-op to repeat.
    pub(crate) async fn remove(&self, id: u64) -> bool {
        let mut slots = self.slots.lock().await;
        slots.remove(&id).is_some()
    }

    /// Point-in-time copy of the delivery lanes of every attached slot.
    pub(crate) async fn snapshot(&self) -> Vec<mpsc::UnboundedSender<Delivery<T>>> {
        let slots = self.slots.lock().await;
        slots.values().map(DeliverySlot::lane).collect()
    }

    /// Atomically removes every slot, returning them so the caller can
    /// keep the workers joinable (shutdown path).
    pub(crate) async fn drain_all(&self) -> Vec<DeliverySlot<T>> {
        let mut slots = self.slots.lock().await;
        slots.drain().map(|(_, slot)| slot).collect()
    }

    pub(crate) async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub(crate) async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_add_remove_and_len() {
        let registry: Arc<Registry<String>> = Registry::new();
        assert!(registry.is_empty().await);

        let (slot, _rx) = DeliverySlot::spawn(7, 1, CancellationToken::new());
        registry.add(slot).await;
        assert_eq!(registry.len().await, 1);

        assert!(registry.remove(7).await);
        assert!(!registry.remove(7).await, "second remove must be a no-op");
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let registry: Arc<Registry<String>> = Registry::new();
        let (slot, _rx) = DeliverySlot::spawn(1, 1, CancellationToken::new());
        registry.add(slot).await;

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);

        // Mutating the registry does not grow a snapshot already taken.
        let (slot2, _rx2) = DeliverySlot::spawn(2, 1, CancellationToken::new());
        registry.add(slot2).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_drain_all_empties_the_set() {
        let registry: Arc<Registry<String>> = Registry::new();
        for id in 0..3u64 {
            let (slot, _rx) = DeliverySlot::spawn(id, 1, CancellationToken::new());
            registry.add(slot).await;
        }

        let drained = registry.drain_all().await;
        assert_eq!(drained.len(), 3);
        assert!(registry.is_empty().await);
    }
}
