//! # Domain Types
//!
//! The catalog has exactly one entity.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        insert        ┌─────────────────┐          │
//! │  │   NewProduct    │ ───────────────────► │    Product      │          │
//! │  │  ─────────────  │   (store assigns id) │  ─────────────  │          │
//! │  │  name           │                      │  id (i64)       │          │
//! │  │  quantity       │                      │  name           │          │
//! │  └─────────────────┘                      │  quantity       │          │
//! │                                           └─────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the database on insert, grows monotonically and is
//! never reused. `name` is the lookup key but is NOT unique.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{parse_quantity, validate_product_name, validate_quantity, ValidationResult};

// =============================================================================
// Product
// =============================================================================

/// A persisted catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier (autoincrement).
    pub id: i64,

    /// Display name, also the search and delete key.
    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} (qty {})", self.id, self.name, self.quantity)
    }
}

// =============================================================================
// New Product
// =============================================================================

/// A validated insert payload.
///
/// Construction is the only place the name and quantity rules run, so
/// anything holding a `NewProduct` can be written without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
}

impl NewProduct {
    /// Builds an insert payload from already-typed values.
    ///
    /// The name is trimmed. Fails on an empty name or a negative quantity.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::NewProduct;
    ///
    /// let p = NewProduct::new("  Widget ", 10).unwrap();
    /// assert_eq!(p.name, "Widget");
    ///
    /// assert!(NewProduct::new("", 10).is_err());
    /// assert!(NewProduct::new("Widget", -1).is_err());
    /// ```
    pub fn new(name: &str, quantity: i64) -> ValidationResult<Self> {
        let name = validate_product_name(name)?;
        validate_quantity(quantity)?;

        Ok(NewProduct { name, quantity })
    }

    /// Builds an insert payload from raw form input.
    ///
    /// The quantity text is coerced with [`parse_quantity`], so it never
    /// fails; only an empty name is rejected.
    pub fn from_input(name: &str, quantity_text: &str) -> ValidationResult<Self> {
        NewProduct::new(name, parse_quantity(quantity_text))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn test_new_product_trims_name() {
        let p = NewProduct::new("  Gadget\t", 5).unwrap();
        assert_eq!(p.name, "Gadget");
        assert_eq!(p.quantity, 5);
    }

    #[test]
    fn test_new_product_rejects_blank_name() {
        let err = NewProduct::new("   ", 5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_new_product_rejects_negative_quantity() {
        let err = NewProduct::new("Widget", -2).unwrap_err();
        assert!(matches!(err, ValidationError::MustBeNonNegative { value: -2, .. }));
    }

    #[test]
    fn test_from_input_coerces_quantity() {
        assert_eq!(NewProduct::from_input("Widget", "12").unwrap().quantity, 12);
        assert_eq!(NewProduct::from_input("Widget", "").unwrap().quantity, 0);
        assert_eq!(NewProduct::from_input("Widget", "lots").unwrap().quantity, 0);
        assert!(NewProduct::from_input("", "12").is_err());
    }

    #[test]
    fn test_product_display_and_serde() {
        let p = Product {
            id: 3,
            name: "Widget".to_string(),
            quantity: 10,
        };
        assert_eq!(p.to_string(), "#3 Widget (qty 10)");

        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Widget","quantity":10}"#);
    }
}
