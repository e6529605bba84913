//! # stockroom-db: Database Layer for Stockroom
//!
//! SQLite-backed product catalog with reactive change notification.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  CLI command / shell input                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │───►│ ProductRepo   │───►│  Database    │  │   │
//! │  │   │ (catalog.rs)  │    │ (product.rs)  │    │  (pool.rs)   │  │   │
//! │  │   │               │    └───────────────┘    └──────────────┘  │   │
//! │  │   │ write lock    │                                            │   │
//! │  │   │               │───►┌───────────────┐    ┌──────────────┐  │   │
//! │  │   └───────────────┘    │CatalogObserver│    │  Migrations  │  │   │
//! │  │                        │ (observer.rs) │    │  (embedded)  │  │   │
//! │  │                        └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                     watch::Receiver<Snapshot> (renderers)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool management
//! - [`migrations`] - Embedded SQL migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL for the products table
//! - [`observer`] - Two-slot latest-value channel
//! - [`catalog`] - The catalog store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{CatalogStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//! let store = CatalogStore::open(db).await?;
//!
//! store.insert("Widget", 10).await?;
//! let hits = store.find_by_name("Wid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod observer;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogStore;
pub use error::{DbError, DbResult};
pub use observer::{CatalogObserver, Snapshot};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
