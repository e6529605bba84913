//! # stockroom-core: Pure Domain Types for Stockroom
//!
//! This crate holds the product entity and the input rules around it.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (stockroom)                         │   │
//! │  │    add ──► find ──► delete ──► list ──► shell                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐    │   │
//! │  │   │    types      │   │  validation   │   │    error      │    │   │
//! │  │   │   Product     │   │ parse_quantity│   │ValidationError│    │   │
//! │  │   │  NewProduct   │   │ name rules    │   │               │    │   │
//! │  │   └───────────────┘   └───────────────┘   └───────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockroom-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, catalog store              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and quantity coercion
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::NewProduct;
//!
//! // Quantity text from a form field; junk becomes zero
//! let product = NewProduct::from_input("Widget", "ten").unwrap();
//! assert_eq!(product.quantity, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
