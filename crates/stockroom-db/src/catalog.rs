//! # Catalog Store
//!
//! The component a presentation layer talks to. It wraps the product
//! repository, serializes mutations, and keeps the observer channel current.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Store                                        │
//! │                                                                         │
//! │  insert(name, qty) ──┐                                                 │
//! │                      ├─► write lock ─► SQL ─► list_all ─► publish_all  │
//! │  delete_by_name(n) ──┘        (held until the publish is done)         │
//! │                                                                         │
//! │  find_by_name(text) ────────────► SQL ─────────────────► publish_search│
//! │                                                                         │
//! │  list_all() ────────────────────► SQL                 (no publish)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Holding the write lock across the republish guarantees subscribers see
//! "all products" snapshots in the same order the mutations happened.
//!
//! A mutation's result reflects the write alone. Once the row is committed
//! the call succeeds; if re-reading the catalog for the republish fails, the
//! failure is logged and the slot keeps its previous snapshot until the next
//! successful publish.
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//! let store = CatalogStore::open(db).await?;
//!
//! let mut rx = store.subscribe_all();
//! store.insert("Widget", 10).await?;
//! rx.changed().await?;
//! ```

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::observer::{CatalogObserver, Snapshot};
use crate::pool::Database;
use crate::repository::product::ProductRepository;
use stockroom_core::{NewProduct, Product};

/// Product catalog with change notification.
///
/// Construct once per database and share by cloning; clones use the same
/// write lock and observer slots.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db: Database,
    products: ProductRepository,
    observer: CatalogObserver,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogStore {
    /// Creates a store over an open database.
    ///
    /// The observer slots start empty; call [`refresh`](Self::refresh) (or
    /// use [`open`](Self::open)) to load rows that already exist on disk.
    pub fn new(db: Database) -> Self {
        CatalogStore {
            products: db.products(),
            db,
            observer: CatalogObserver::new(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store and publishes the persisted rows.
    pub async fn open(db: Database) -> DbResult<Self> {
        let store = CatalogStore::new(db);
        let loaded = store.refresh().await?;
        info!(products = loaded.len(), "Catalog opened");
        Ok(store)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts a product and republishes "all products".
    ///
    /// ## Errors
    /// * `DbError::Validation` - empty name or negative quantity; nothing
    ///   is written
    /// * any other variant - storage failure
    pub async fn insert(&self, name: &str, quantity: i64) -> DbResult<Product> {
        let new_product = NewProduct::new(name, quantity)?;
        self.insert_product(&new_product).await
    }

    /// Inserts from raw form input, coercing the quantity text.
    ///
    /// `"abc"`, `""` and `"-3"` all store a quantity of zero.
    pub async fn insert_from_input(&self, name: &str, quantity_text: &str) -> DbResult<Product> {
        let new_product = NewProduct::from_input(name, quantity_text)?;
        self.insert_product(&new_product).await
    }

    /// Inserts an already-validated payload and republishes.
    pub async fn insert_product(&self, new_product: &NewProduct) -> DbResult<Product> {
        let _guard = self.write_lock.lock().await;

        let product = self.products.insert(new_product).await?;
        self.republish_after_write().await;

        info!(id = product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Removes every product named exactly `name` and republishes.
    ///
    /// `name` is compared as given, surrounding whitespace included.
    ///
    /// ## Returns
    /// Number of rows removed; deleting a missing name returns zero.
    pub async fn delete_by_name(&self, name: &str) -> DbResult<u64> {
        let _guard = self.write_lock.lock().await;

        let removed = self.products.delete_by_name(name).await?;
        self.republish_after_write().await;

        info!(name = %name, removed, "Products deleted");
        Ok(removed)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Finds products whose name contains `text` and publishes them to the
    /// "search results" slot.
    ///
    /// The match is case-sensitive and uses `text` verbatim, spaces
    /// included. An empty `text` matches every product.
    /// "All products" is left untouched.
    pub async fn find_by_name(&self, text: &str) -> DbResult<Vec<Product>> {
        let hits = self.products.find_by_name(text).await?;

        self.observer.publish_search(hits.clone());
        Ok(hits)
    }

    /// Lists every product, ascending id. Publishes nothing.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        self.products.list_all().await
    }

    /// Gets a single product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no row with this id
    pub async fn get(&self, id: i64) -> DbResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        self.products.count().await
    }

    /// Resets "search results" to an empty list.
    pub fn clear_search(&self) {
        debug!("Clearing search results");
        self.observer.publish_search(Vec::new());
    }

    /// Re-reads every row and republishes "all products".
    pub async fn refresh(&self) -> DbResult<Vec<Product>> {
        let _guard = self.write_lock.lock().await;
        self.publish_all_locked().await
    }

    // =========================================================================
    // Observer access
    // =========================================================================

    /// Returns the observer channel.
    pub fn observer(&self) -> &CatalogObserver {
        &self.observer
    }

    /// Subscribes to "all products".
    pub fn subscribe_all(&self) -> watch::Receiver<Snapshot> {
        self.observer.subscribe_all()
    }

    /// Subscribes to "search results".
    pub fn subscribe_search(&self) -> watch::Receiver<Snapshot> {
        self.observer.subscribe_search()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the connection pool. Later operations fail with a
    /// connection error.
    pub async fn close(&self) {
        self.db.close().await;
    }

    /// Caller must hold `write_lock` and has already committed its write.
    async fn republish_after_write(&self) {
        if let Err(err) = self.publish_all_locked().await {
            warn!(error = %err, "Write committed but republishing all products failed");
        }
    }

    /// Caller must hold `write_lock`.
    async fn publish_all_locked(&self) -> DbResult<Vec<Product>> {
        let snapshot = self.products.list_all().await?;
        self.observer.publish_all(snapshot.clone());
        Ok(snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
