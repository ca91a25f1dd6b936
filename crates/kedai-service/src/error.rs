//! # Service Error Types
//!
//! What the UI layers see. Lifecycle failures that a cashier can act on
//! (bad input, lost payment race, missing order) are typed; everything
//! else surfaces as an opaque repository failure behind a retry prompt.

use thiserror::Error;

use kedai_core::{OrderStatus, ValidationError};
use kedai_db::DbError;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Checkout or filter input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A lifecycle transition was attempted from the wrong status.
    ///
    /// Covers both a stale screen (cashier confirms an order someone
    /// already handled) and the losing side of a genuine race.
    #[error("Order {id} is {current}, cannot move to {attempted}")]
    InvalidTransition {
        id: String,
        current: OrderStatus,
        attempted: OrderStatus,
    },

    /// Persistence failure with no lifecycle meaning.
    #[error("Repository error: {0}")]
    Repository(DbError),
}

impl ServiceError {
    /// Maps a repository error from a status transition, attaching the
    /// status the caller was trying to reach.
    pub(crate) fn from_transition(err: DbError, attempted: OrderStatus) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::StatusConflict { id, current, .. } => ServiceError::InvalidTransition {
                id,
                current,
                attempted,
            },
            other => ServiceError::Repository(other),
        }
    }
}

/// Outside of transitions there is no `attempted` status to attach, so
/// `NotFound` keeps its identity and the rest becomes `Repository`.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            other => ServiceError::Repository(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conflict_becomes_invalid_transition() {
        let db_err = DbError::StatusConflict {
            id: "ord-1".to_string(),
            current: OrderStatus::Paid,
            expected: OrderStatus::Pending,
        };
        let err = ServiceError::from_transition(db_err, OrderStatus::Paid);
        assert_eq!(
            err.to_string(),
            "Order ord-1 is paid, cannot move to paid"
        );
    }

    #[test]
    fn test_not_found_keeps_identity() {
        let err: ServiceError = DbError::not_found("Order", "ord-404").into();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert_eq!(err.to_string(), "Order not found: ord-404");
    }
}
