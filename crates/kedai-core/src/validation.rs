//! # Validation Module
//!
//! Input validation for checkout and product data.
//!
//! Validation runs at the service boundary before business logic; the
//! database adds its own NOT NULL / CHECK constraints as a second layer.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the buyer name entered at checkout.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use kedai_core::validation::validate_buyer_name;
///
/// assert_eq!(validate_buyer_name("  Budi ").unwrap(), "Budi");
/// assert!(validate_buyer_name("").is_err());
/// assert!(validate_buyer_name("   ").is_err());
/// ```
pub fn validate_buyer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "buyer_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "buyer_name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a persisted line quantity. Must be a positive integer:
/// zero-quantity lines cannot exist in a stored order.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in rupiah.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promo items)
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
