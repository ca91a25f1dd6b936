//! # Order Service
//!
//! Checkout and the order payment lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Lifecycle Operations                          │
//! │                                                                         │
//! │  Cashier                                  Admin back-office            │
//! │  ───────                                  ──────────────────           │
//! │                                                                         │
//! │  create_order(buyer, cart)                                             │
//! │       │  snapshot lines, compute totals,                               │
//! │       │  persist as 'pending', clear cart                              │
//! │       ▼                                                                 │
//! │  mark_paid(id, method) ──────────────────► confirm_accepted(id)        │
//! │       pending → paid                           paid → accepted         │
//! │                                                                         │
//! │  Both transitions run as a compare-and-swap in the repository, so a    │
//! │  double-tap or a second cashier produces exactly one winner and one    │
//! │  InvalidTransition error.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};
use uuid::Uuid;

use kedai_core::validation::validate_buyer_name;
use kedai_core::{Cart, Order, OrderLine, OrderStatus, PaymentMethod, ValidationError};
use kedai_db::OrderRepository;

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Order Service
// =============================================================================

/// Checkout and lifecycle operations over an [`OrderRepository`].
#[derive(Debug, Clone)]
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    /// Creates a service over the given repository.
    pub fn new(repo: R) -> Self {
        OrderService { repo }
    }

    /// Creates a pending order from the cart and clears the cart.
    ///
    /// ## What This Does
    /// 1. Validates the buyer name (trimmed, non-empty, max 100 chars)
    /// 2. Rejects an empty cart
    /// 3. Freezes each cart line into an order line snapshot
    /// 4. Computes subtotal, 11% tax (rounded half-up), and total
    /// 5. Persists the order as `pending` with a fresh invoice number
    /// 6. Clears the cart only after the order is stored
    ///
    /// ## Errors
    /// - `ServiceError::Validation` - bad buyer name or empty cart
    /// - `ServiceError::Repository` - persistence failure (cart is kept)
    pub async fn create_order(&self, buyer_name: &str, cart: &mut Cart) -> ServiceResult<Order> {
        let buyer_name = validate_buyer_name(buyer_name)?;

        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let id = Uuid::new_v4().to_string();
        let invoice_number = generate_invoice_number();
        let now = Utc::now();

        let lines: Vec<OrderLine> = cart
            .lines
            .iter()
            .map(|l| OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: id.clone(),
                product_id: l.product_id.clone(),
                name_snapshot: l.name.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity,
                line_total: l.line_total(),
            })
            .collect();

        let totals = cart.totals();

        let order = Order {
            id,
            invoice_number,
            buyer_name,
            lines,
            subtotal: totals.subtotal.rupiah(),
            tax: totals.tax.rupiah(),
            total: totals.total.rupiah(),
            status: OrderStatus::Pending,
            payment_method: None,
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %order.id,
            invoice = %order.invoice_number,
            total = order.total,
            "Creating order"
        );

        let stored = self.repo.create(&order).await?;

        // The cart survives a failed checkout; only success clears it
        cart.clear();

        info!(
            id = %stored.id,
            invoice = %stored.invoice_number,
            buyer = %stored.buyer_name,
            total = stored.total,
            "Order created"
        );

        Ok(stored)
    }

    /// Records a payment: `pending → paid` with the payment method.
    ///
    /// ## Errors
    /// - `ServiceError::NotFound` - no such order
    /// - `ServiceError::InvalidTransition` - order is not pending (already
    ///   paid, already accepted, or a concurrent attempt won the race)
    pub async fn mark_paid(&self, id: &str, method: PaymentMethod) -> ServiceResult<Order> {
        debug!(id = %id, method = %method, "Marking order paid");

        let order = self
            .repo
            .update_status(id, OrderStatus::Pending, OrderStatus::Paid, Some(method))
            .await
            .map_err(|e| ServiceError::from_transition(e, OrderStatus::Paid))?;

        info!(id = %order.id, method = %method, "Order paid");
        Ok(order)
    }

    /// Confirms receipt of payment: `paid → accepted` (terminal).
    ///
    /// ## Errors
    /// - `ServiceError::NotFound` - no such order
    /// - `ServiceError::InvalidTransition` - order is not paid (still
    ///   pending, or already accepted)
    pub async fn confirm_accepted(&self, id: &str) -> ServiceResult<Order> {
        debug!(id = %id, "Confirming order accepted");

        let order = self
            .repo
            .update_status(id, OrderStatus::Paid, OrderStatus::Accepted, None)
            .await
            .map_err(|e| ServiceError::from_transition(e, OrderStatus::Accepted))?;

        info!(id = %order.id, "Order accepted");
        Ok(order)
    }

    /// Fetches an order by id.
    pub async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Order".to_string(),
                id: id.to_string(),
            })
    }

    /// Builds the printable receipt view of an order.
    pub async fn get_receipt(&self, id: &str) -> ServiceResult<Receipt> {
        let order = self.get_order(id).await?;
        Ok(Receipt::from_order(&order))
    }
}

// =============================================================================
// Receipt View
// =============================================================================

/// Flat, display-ready view of an order for the receipt printer and the
/// order-detail screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: String,
    pub invoice_number: String,
    pub buyer_name: String,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub items: Vec<ReceiptItem>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    /// Checkout timestamp, RFC 3339.
    pub created_at: String,
}

/// One line on the receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub line_total: i64,
}

impl Receipt {
    fn from_order(order: &Order) -> Self {
        Receipt {
            order_id: order.id.clone(),
            invoice_number: order.invoice_number.clone(),
            buyer_name: order.buyer_name.clone(),
            status: order.status,
            payment_method: order.payment_method,
            items: order
                .lines
                .iter()
                .map(|l| ReceiptItem {
                    name: l.name_snapshot.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    line_total: l.line_total,
                })
                .collect(),
            subtotal: order.subtotal,
            tax: order.tax,
            total: order.total,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Invoice Numbers
// =============================================================================

static INVOICE_SEQ: AtomicU32 = AtomicU32::new(0);

/// Generates an invoice number in format: INV-YYYYMMDD-NNNN
///
/// The sequence mixes the wall clock with a process-local counter so that
/// back-to-back checkouts in the same millisecond still get distinct
/// numbers. The UNIQUE constraint on `orders.invoice_number` is the
/// backstop.
///
/// TODO: replace the sequence with a daily counter persisted in the
/// database so numbers survive restarts gap-free.
fn generate_invoice_number() -> String {
    let now = Utc::now();
    let date_part = now.format("%Y%m%d");

    let counter = INVOICE_SEQ.fetch_add(1, Ordering::Relaxed);
    let seq = ((now.timestamp_millis() as u32).wrapping_add(counter)) % 10_000;

    format!("INV-{}-{:04}", date_part, seq)
}

// =============================================================================
// Unit Tests
// =============================================================================
