//! # Repository Module
//!
//! The persistence contract for orders, plus its implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The service layer never touches SQL. It talks to the                  │
//! │  OrderRepository trait:                                                 │
//! │                                                                         │
//! │  OrderService::mark_paid(id, method)                                   │
//! │       │                                                                 │
//! │       │  repo.update_status(id, Pending, Paid, Some(method))           │
//! │       ▼                                                                 │
//! │  ┌────────────────────────┐      ┌──────────────────────────┐          │
//! │  │ SqliteOrderRepository  │  or  │  MemoryOrderRepository   │          │
//! │  │ (production)           │      │  (tests)                 │          │
//! │  └────────────────────────┘      └──────────────────────────┘          │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • The lifecycle logic is testable without a database                  │
//! │  • SQL is isolated in one place                                        │
//! │  • The compare-and-swap contract is stated once, implemented twice     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kedai_core::{Order, OrderStatus, PaymentMethod};

use crate::error::DbResult;

pub mod memory;
pub mod order;
pub mod product;

// =============================================================================
// Query Shapes
// =============================================================================

/// Filter for the order history query.
///
/// Every field is optional; `None` means "no constraint". Presence of
/// `status` or `payment_method` is an exact-match constraint, so callers
/// must normalize their own "all" sentinel values before reaching here.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Exact status match.
    pub status: Option<OrderStatus>,
    /// Exact payment method match.
    pub payment_method: Option<PaymentMethod>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
    /// Substring match over invoice number and buyer name,
    /// case-insensitive for ASCII only (SQLite's `LOWER()` leaves
    /// non-ASCII characters untouched, and both implementations must
    /// agree).
    pub search: Option<String>,
}

impl OrderFilter {
    /// Whether an order satisfies this filter.
    ///
    /// Shared by the in-memory repository; the SQLite implementation
    /// compiles the same semantics into its WHERE clause.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(method) = self.payment_method {
            if order.payment_method != Some(method) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if order.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if order.created_at > to {
                return false;
            }
        }
        if let Some(search) = &self.search {
            // ASCII folding only, matching SQLite's LOWER()
            let needle = search.to_ascii_lowercase();
            let invoice = order.invoice_number.to_ascii_lowercase();
            let buyer = order.buyer_name.to_ascii_lowercase();
            if !invoice.contains(&needle) && !buyer.contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Page request: 1-based page number and page size.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Pagination {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Row offset for this page.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, newest first.
    pub items: Vec<T>,
    /// Total number of matching rows across all pages.
    pub total: i64,
    /// The page that was returned (1-based).
    pub page: u32,
    /// The last page number. 1 even when there are no results.
    pub last_page: u32,
}

impl<T> Page<T> {
    /// Assembles a page, deriving `last_page` from the total row count.
    ///
    /// The fields of `Pagination` are public, so a hand-built value may
    /// carry `per_page: 0`; clamp again here rather than divide by it.
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let per_page = (pagination.per_page as i64).max(1);
        let last_page = ((total + per_page - 1) / per_page).max(1) as u32;
        Page {
            items,
            total,
            page: pagination.page,
            last_page,
        }
    }
}

// =============================================================================
// Order Repository Contract
// =============================================================================

/// Persistence contract consumed by the order state machine, the history
/// query service, and the dashboard aggregation.
///
/// ## Atomicity Contract
/// `update_status` must execute as an atomic check-and-set: read the
/// current status, verify it equals `expected`, and write `new_status` as
/// a single operation. Two concurrent transitions on the same order must
/// result in exactly one success and one `DbError::StatusConflict`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a freshly created order with its lines. Returns the stored
    /// order.
    async fn create(&self, order: &Order) -> DbResult<Order>;

    /// Fetches an order (with lines) by id. `Ok(None)` when absent.
    async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>>;

    /// Atomically advances the status of an order, conditional on its
    /// current status being `expected`.
    ///
    /// ## Errors
    /// - `DbError::NotFound` - no order with that id
    /// - `DbError::StatusConflict` - current status differs from `expected`
    async fn update_status(
        &self,
        id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        payment_method: Option<PaymentMethod>,
    ) -> DbResult<Order>;

    /// Returns a filtered, paginated view of orders, newest first.
    async fn query(&self, filter: &OrderFilter, pagination: Pagination) -> DbResult<Page<Order>>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn search_order(invoice: &str, buyer: &str) -> Order {
        let now = Utc::now();
        Order {
            id: "o1".to_string(),
            invoice_number: invoice.to_string(),
            buyer_name: buyer.to_string(),
            lines: vec![],
            subtotal: 0,
            tax: 0,
            total: 0,
            status: OrderStatus::Pending,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_filter_search_folds_ascii_only() {
        let order = search_order("INV-B2", "Café Siti");
        let search = |s: &str| OrderFilter {
            search: Some(s.to_string()),
            ..Default::default()
        };

        // ASCII case differences match either field
        assert!(search("inv-b2").matches(&order));
        assert!(search("SITI").matches(&order));

        // Non-ASCII characters compare exactly, as SQLite's LOWER() would
        assert!(search("Café").matches(&order));
        assert!(!search("CAFÉ").matches(&order));
    }

    #[test]
    fn test_pagination_clamps_to_one() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination::new(3, 10);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_page_survives_hand_built_zero_per_page() {
        // Literal construction skips Pagination::new's clamp
        let p = Pagination { page: 1, per_page: 0 };
        let page = Page::<i32>::new(vec![], 5, &p);
        assert_eq!(page.last_page, 5);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_page_last_page_rounding() {
        let p = Pagination::new(1, 10);
        assert_eq!(Page::<i32>::new(vec![], 0, &p).last_page, 1);
        assert_eq!(Page::<i32>::new(vec![], 5, &p).last_page, 1);
        assert_eq!(Page::<i32>::new(vec![], 10, &p).last_page, 1);
        assert_eq!(Page::<i32>::new(vec![], 11, &p).last_page, 2);
        assert_eq!(Page::<i32>::new(vec![], 25, &p).last_page, 3);
    }
}
