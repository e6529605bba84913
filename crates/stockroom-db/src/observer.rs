//! # Catalog Observer Channel
//!
//! Push-based delivery of the two catalog views to any number of consumers.
//!
//! ## Slots
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Observer Slots                                       │
//! │                                                                         │
//! │  insert / delete ──► publish_all(snapshot) ──► all_products    ──┐     │
//! │                                                                  │     │
//! │  find_by_name    ──► publish_search(hits)  ──► search_results  ──┤     │
//! │                                                                  ▼     │
//! │                                     watch::Receiver (one per consumer) │
//! │                                                                         │
//! │  • Each slot holds exactly one value (starts as an empty list)         │
//! │  • A publish replaces the value; nothing is buffered                   │
//! │  • A new subscriber sees the latest value immediately                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both slots are `tokio::sync::watch` channels. The sender half is owned
//! here, so publishing succeeds whether or not anyone is listening.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

use stockroom_core::Product;

/// Shared snapshot type carried by both slots.
pub type Snapshot = Arc<Vec<Product>>;

/// The two-slot observer channel.
///
/// Cloning shares the same slots.
#[derive(Debug, Clone)]
pub struct CatalogObserver {
    all_tx: Arc<watch::Sender<Snapshot>>,
    search_tx: Arc<watch::Sender<Snapshot>>,
}

impl CatalogObserver {
    /// Creates a channel with both slots holding an empty list.
    pub fn new() -> Self {
        let (all_tx, _) = watch::channel(Snapshot::default());
        let (search_tx, _) = watch::channel(Snapshot::default());

        CatalogObserver {
            all_tx: Arc::new(all_tx),
            search_tx: Arc::new(search_tx),
        }
    }

    /// Replaces the "all products" value.
    pub fn publish_all(&self, products: Vec<Product>) {
        trace!(count = products.len(), "Publishing all products");
        self.all_tx.send_replace(Arc::new(products));
    }

    /// Replaces the "search results" value.
    pub fn publish_search(&self, products: Vec<Product>) {
        trace!(count = products.len(), "Publishing search results");
        self.search_tx.send_replace(Arc::new(products));
    }

    /// Subscribes to "all products".
    ///
    /// The receiver's current value is the latest published snapshot.
    pub fn subscribe_all(&self) -> watch::Receiver<Snapshot> {
        self.all_tx.subscribe()
    }

    /// Subscribes to "search results".
    pub fn subscribe_search(&self) -> watch::Receiver<Snapshot> {
        self.search_tx.subscribe()
    }

    /// Returns the latest "all products" snapshot.
    pub fn current_all(&self) -> Snapshot {
        self.all_tx.borrow().clone()
    }

    /// Returns the latest "search results" snapshot.
    pub fn current_search(&self) -> Snapshot {
        self.search_tx.borrow().clone()
    }
}

impl Default for CatalogObserver {
    fn default() -> Self {
        CatalogObserver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_slots_start_empty() {
        let observer = CatalogObserver::new();
        assert!(observer.current_all().is_empty());
        assert!(observer.current_search().is_empty());
        assert!(observer.subscribe_all().borrow().is_empty());
    }

    #[test]
    fn test_publish_without_subscribers_is_retained() {
        let observer = CatalogObserver::new();
        observer.publish_all(vec![product(1, "Widget")]);

        assert_eq!(observer.current_all().len(), 1);
    }

    #[test]
    fn test_late_subscriber_replays_latest_only() {
        let observer = CatalogObserver::new();
        observer.publish_all(vec![product(1, "Widget")]);
        observer.publish_all(vec![product(1, "Widget"), product(2, "Gadget")]);

        let rx = observer.subscribe_all();
        let latest = rx.borrow().clone();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[1].name, "Gadget");
    }

    #[test]
    fn test_slots_are_independent() {
        let observer = CatalogObserver::new();
        observer.publish_search(vec![product(7, "Widget")]);

        assert!(observer.current_all().is_empty());
        assert_eq!(observer.current_search()[0].id, 7);
    }

    #[tokio::test]
    async fn test_subscriber_is_notified_of_change() {
        let observer = CatalogObserver::new();
        let mut rx = observer.subscribe_search();

        let publisher = observer.clone();
        tokio::spawn(async move {
            publisher.publish_search(vec![product(3, "Gadget")]);
        });

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].id, 3);
    }
}
