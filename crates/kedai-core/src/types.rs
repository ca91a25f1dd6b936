//! # Domain Types
//!
//! Core domain types used throughout Kedai POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name           │   │  invoice_number │   │  name_snapshot  │       │
//! │  │  category       │   │  buyer_name     │   │  unit_price     │       │
//! │  │  price          │   │  status         │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderStatus   │   │ PaymentMethod   │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Pending        │   │  Cash           │   │  Coffee         │       │
//! │  │  Paid           │   │  Qris           │   │  NonCoffee      │       │
//! │  │  Accepted       │   │  Debit          │   │  Snack, ...     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pricing
//! An OrderLine carries the product name and unit price copied at order
//! creation time. Orders never change value if the product's price later
//! changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// Menu category of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Coffee,
    NonCoffee,
    Snack,
    Pastry,
    HeavyMeal,
}

// =============================================================================
// Product
// =============================================================================

/// A product on the menu, managed by the admin back-office.
///
/// Immutable once referenced by an order line: the price is copied into the
/// order line at order-creation time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on the invoice.
    pub name: String,

    /// Optional description for the marketing site and product details.
    pub description: Option<String>,

    /// Menu category.
    pub category: Category,

    /// Unit price in whole rupiah (non-negative).
    pub price: i64,

    /// Optional image reference (path or URL, stored by the upload layer).
    pub image_url: Option<String>,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupiah(self.price)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ## State Machine
/// ```text
/// pending ──mark_paid──▶ paid ──confirm_accepted──▶ accepted (terminal)
/// ```
/// Status only advances forward: no regression, no skipping `paid` to
/// reach `accepted`, no reopening once `accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created at checkout, payment not yet recorded.
    Pending,
    /// Cashier has recorded a payment method.
    Paid,
    /// Back-office has confirmed receipt of payment. Terminal.
    Accepted,
}

impl OrderStatus {
    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// This is the single source of truth for the transition rules; the
    /// atomicity of applying a transition belongs to the storage layer.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Paid, OrderStatus::Accepted)
        )
    }

    /// Whether no further transition is permitted from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Accepted)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Accepted => write!(f, "accepted"),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the buyer paid. Required once an order leaves `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash at the counter.
    Cash,
    /// QRIS standard QR payment.
    Qris,
    /// Debit card / bank transfer.
    Debit,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Qris => write!(f, "qris"),
            PaymentMethod::Debit => write!(f, "debit"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A durable order created from a cart snapshot at checkout.
///
/// Line items and price snapshots are immutable after creation; only the
/// state machine mutates `status` and `payment_method`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4), server-assigned.
    pub id: String,

    /// Unique human-readable invoice number, e.g. `INV-20260824-0042`.
    pub invoice_number: String,

    /// Name of the buyer, required non-empty before checkout.
    pub buyer_name: String,

    /// Line items with name/price snapshots. Never empty for a persisted
    /// order, and every quantity is a positive integer.
    pub lines: Vec<OrderLine>,

    /// Σ(line.unit_price × line.quantity), whole rupiah.
    pub subtotal: i64,

    /// 11% of the subtotal, rounded half-up.
    pub tax: i64,

    /// subtotal + tax.
    pub total: i64,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Recorded when the cashier marks the order paid.
    pub payment_method: Option<PaymentMethod>,

    /// When the order was created (checkout time).
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the order was last updated (status changes).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_rupiah(self.subtotal)
    }

    /// Returns the tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_rupiah(self.tax)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_rupiah(self.total)
    }

    /// Total number of units across all lines.
    pub fn items_sold(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One product entry within an order.
/// Uses the snapshot pattern to freeze product data at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning order.
    pub order_id: String,

    /// Reference to the live product record.
    pub product_id: String,

    /// Product name at checkout time (frozen).
    pub name_snapshot: String,

    /// Unit price in rupiah at checkout time (frozen).
    pub unit_price: i64,

    /// Quantity ordered, always >= 1.
    pub quantity: i64,

    /// unit_price × quantity.
    pub line_total: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_rupiah(self.unit_price)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_rupiah(self.line_total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_forward_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Accepted));
    }

    #[test]
    fn test_status_rejects_regression_and_skips() {
        // No skipping paid
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Accepted));
        // No regression
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Paid));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Pending));
        // No self-loops (double payment capture guard)
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Paid));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_accepted_is_terminal() {
        assert!(OrderStatus::Accepted.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let back: OrderStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(back, OrderStatus::Accepted);
        // Unrecognized values are rejected at the deserialization boundary
        assert!(serde_json::from_str::<OrderStatus>("\"PAID\"").is_err());
    }

    #[test]
    fn test_payment_method_display() {
        assert_eq!(PaymentMethod::Cash.to_string(), "cash");
        assert_eq!(PaymentMethod::Qris.to_string(), "qris");
        assert_eq!(PaymentMethod::Debit.to_string(), "debit");
    }
}
