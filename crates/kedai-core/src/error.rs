//! # Error Types
//!
//! Domain-specific error types for kedai-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kedai-core errors (this file)                                         │
//! │  ├── CoreError        - Lifecycle and domain rule violations           │
//! │  └── ValidationError  - Bad checkout input                             │
//! │                                                                         │
//! │  kedai-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  kedai-service errors (separate crate)                                 │
//! │  └── ServiceError     - What the UI layers see                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → UI                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (order id, statuses)
//! 3. Errors are enum variants, never String
//! 4. No local recovery: every error surfaces to the caller unmodified

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent lifecycle rule violations or bad caller input. The UI
/// layer maps them to user-facing messages (inline form message for
/// validation, toast for an invalid transition).
#[derive(Debug, Error)]
pub enum CoreError {
    /// No order exists with the given id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The state machine precondition was violated.
    ///
    /// ## When This Occurs
    /// - `mark_paid` on an order that is already paid or accepted
    /// - `confirm_accepted` on an order that is still pending
    /// - Any transition attempted on an accepted (terminal) order
    /// - Losing one of two concurrent transition attempts
    #[error("Order {order_id} is {current}, cannot move to {attempted}")]
    InvalidTransition {
        order_id: String,
        current: OrderStatus,
        attempted: OrderStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when checkout input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing, empty, or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A choice field received a value outside its vocabulary.
    #[error("{field} has unrecognized value '{value}'")]
    InvalidValue { field: String, value: String },

    /// Checkout was submitted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            order_id: "ord-1".to_string(),
            current: OrderStatus::Paid,
            attempted: OrderStatus::Paid,
        };
        assert_eq!(err.to_string(), "Order ord-1 is paid, cannot move to paid");

        let err = CoreError::OrderNotFound("ord-404".to_string());
        assert_eq!(err.to_string(), "Order not found: ord-404");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "buyer_name".to_string(),
        };
        assert_eq!(err.to_string(), "buyer_name is required");

        assert_eq!(ValidationError::EmptyCart.to_string(), "cart is empty");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
