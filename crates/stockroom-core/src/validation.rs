//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI / shell)                                   │
//! │  ├── Quantity text coercion (parse_quantity)                           │
//! │  └── Empty input → no-op, nothing is called                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Name: non-empty after trim, any length                            │
//! │  └── Quantity: non-negative                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (quantity >= 0), CHECK (length(name) > 0)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{parse_quantity, validate_product_name};
//!
//! assert_eq!(validate_product_name(" Widget ").unwrap(), "Widget");
//! assert_eq!(parse_quantity("abc"), 0);
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - No length limit
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stored quantity.
///
/// ## Rules
/// - Must be zero or positive
/// - No upper bound
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
            value: qty,
        });
    }

    Ok(())
}

/// Coerces free-form quantity text into a stored quantity.
///
/// ## Rules
/// ```text
/// "12"      → 12
/// " 7 "     → 7
/// ""        → 0
/// "ten"     → 0
/// "3.5"     → 0   (not an integer)
/// "-4"      → 0   (quantities are never negative)
/// "9999…9"  → 0   (overflows i64)
/// ```
///
/// Never fails. Callers that accept typed user input go through this before
/// building a [`NewProduct`](crate::NewProduct).
pub fn parse_quantity(text: &str) -> i64 {
    text.trim().parse::<i64>().ok().filter(|q| *q >= 0).unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Widget").unwrap(), "Widget");
        assert_eq!(validate_product_name("  Blue Widget  ").unwrap(), "Blue Widget");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t\n").is_err());
        let long = "A".repeat(10_000);
        assert_eq!(validate_product_name(&long).unwrap(), long);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12"), 12);
        assert_eq!(parse_quantity(" 7 "), 7);
        assert_eq!(parse_quantity("0"), 0);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("   "), 0);
        assert_eq!(parse_quantity("ten"), 0);
        assert_eq!(parse_quantity("3.5"), 0);
        assert_eq!(parse_quantity("-4"), 0);
        assert_eq!(parse_quantity("99999999999999999999999"), 0);
    }
}
